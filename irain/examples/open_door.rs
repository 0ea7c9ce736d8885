//! Board control example

use irain::Controller;

#[tokio::main]
async fn main() -> irain::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let ip = std::env::var("BOARD_IP").unwrap_or_else(|_| "192.168.1.10".to_string());

    let mut board = Controller::new(ip, 8000, 1);
    board.connect().await?;

    println!("Board connected!");

    // Open door 1
    let status = board.open_door(1).await?;
    println!("open_door: {}", status.reply_text());

    // The same operation via the textual surface
    let reply = board.serve_text("OPEN=1").await;
    println!("OPEN=1: {}", reply);

    board.disconnect().await?;

    Ok(())
}
