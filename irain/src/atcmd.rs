//! Textual command surface
//!
//! Upstream callers drive the board with short command lines
//! (`OPEN=<door>`, `ADD=<card>`, `DELETE=<card>`, `CLEAR`), optionally
//! prefixed with `AT+`. This module is a thin table lookup translating a
//! line into a [`Command`]; all real work happens in the catalog builders.

use irain_core::{catalog, Command};
use irain_types::Wg26Id;

use crate::error::{Error, Result};

/// Translate one command line into a command frame for the given board
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] with a short machine-readable code
/// for unknown verbs, wrong argument counts and malformed arguments. The
/// rejection happens before any frame byte is built.
///
/// # Examples
///
/// ```
/// use irain::atcmd;
///
/// let cmd = atcmd::apply(0x01, "OPEN=3").unwrap();
/// assert_eq!(u8::from(cmd.id), 0x5A);
/// ```
pub fn apply(board_addr: u8, line: &str) -> Result<Command> {
    let line = line.trim();
    let line = line.strip_prefix("AT+").unwrap_or(line);

    let (verb, arg) = match line.split_once('=') {
        Some((verb, arg)) => (verb, Some(arg)),
        None => (line, None),
    };

    match verb {
        "OPEN" => {
            let arg = require_arg(verb, arg)?;
            let door_id: u8 = arg
                .parse()
                .map_err(|_| Error::InvalidArgument(format!("INVALID_SWITCH_ID:{}", arg)))?;
            Ok(catalog::remote_open(board_addr, door_id))
        }
        // ADD0 is a historical alias kept for existing callers
        "ADD" | "ADD0" => {
            let card = parse_card(require_arg(verb, arg)?)?;
            Ok(catalog::card_add(board_addr, &card))
        }
        "DELETE" => {
            let card = parse_card(require_arg(verb, arg)?)?;
            Ok(catalog::card_delete(board_addr, &card))
        }
        "CLEAR" => {
            if arg.is_some() {
                return Err(Error::InvalidArgument("CLEAR_TAKES_NO_ARGS".into()));
            }
            Ok(catalog::card_clear(board_addr))
        }
        other => Err(Error::InvalidArgument(format!("UNKNOWN_COMMAND:{}", other))),
    }
}

fn require_arg<'a>(verb: &str, arg: Option<&'a str>) -> Result<&'a str> {
    match arg {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => Err(Error::InvalidArgument(format!("MISSING_ARG:{}", verb))),
    }
}

fn parse_card(card_sn: &str) -> Result<Wg26Id> {
    Wg26Id::parse_card_sn(card_sn)
        .map_err(|_| Error::InvalidArgument(format!("INVALID_CARD_SN[10digits]:{}", card_sn)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use irain_core::{CommandId, ProtocolProfile};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open() {
        let cmd = apply(0x01, "OPEN=3").unwrap();
        assert_eq!(cmd.id, CommandId::RemoteOpen);
        assert_eq!(cmd.payload.as_ref(), &[0x03]);

        // Byte-identical to the direct builder
        let direct = catalog::remote_open(0x01, 3);
        let profile = ProtocolProfile::standard();
        assert_eq!(
            cmd.encode(&profile).unwrap(),
            direct.encode(&profile).unwrap()
        );
    }

    #[test]
    fn test_open_with_at_prefix() {
        let cmd = apply(0x01, "AT+OPEN=2").unwrap();
        assert_eq!(cmd.payload.as_ref(), &[0x02]);
    }

    #[test]
    fn test_open_invalid_door() {
        let err = apply(0x01, "OPEN=banana").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref d) if d.contains("INVALID_SWITCH_ID")));
    }

    #[test]
    fn test_add_and_alias() {
        let cmd = apply(0x01, "ADD=0005653307").unwrap();
        assert_eq!(cmd.id, CommandId::CardAdd);
        assert_eq!(cmd.payload.len(), 22);

        let alias = apply(0x01, "ADD0=0005653307").unwrap();
        assert_eq!(cmd.payload, alias.payload);
    }

    #[test]
    fn test_add_invalid_card() {
        let err = apply(0x01, "ADD=123").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref d) if d.contains("INVALID_CARD_SN")));
    }

    #[test]
    fn test_delete() {
        let cmd = apply(0x01, "DELETE=0005653307").unwrap();
        assert_eq!(cmd.id, CommandId::CardDelete);
        assert_eq!(cmd.payload.len(), 6);
    }

    #[test]
    fn test_clear() {
        let cmd = apply(0x01, "CLEAR").unwrap();
        assert_eq!(cmd.id, CommandId::CardClear);
        assert_eq!(cmd.payload.as_ref(), &[0x78, 0x79, 0x7A]);
    }

    #[test]
    fn test_clear_rejects_args() {
        assert!(apply(0x01, "CLEAR=1").is_err());
    }

    #[test]
    fn test_unknown_verb() {
        let err = apply(0x01, "REBOOT").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref d) if d.contains("UNKNOWN_COMMAND")));
    }

    #[test]
    fn test_missing_arg() {
        assert!(apply(0x01, "OPEN").is_err());
        assert!(apply(0x01, "OPEN=").is_err());
    }
}
