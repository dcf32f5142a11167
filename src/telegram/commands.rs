//! Command parsing
//!
//! Commands are `.`-prefixed, case-insensitive, and must match the whole
//! message. Anything that does not parse as a command is offered to the
//! conversation engine instead.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cached regexes for the command patterns
/// Compiled once at startup and reused for all messages
static CID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.cid\s+(\d+)$").expect("Failed to compile cid regex"));
static TP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.tp\s+(\d+)$").expect("Failed to compile tp regex"));
static GOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.gor$").expect("Failed to compile gor regex"));
static CD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.cd$").expect("Failed to compile cd regex"));
static PING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.ping$").expect("Failed to compile ping regex"));
static HELP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\.help$").expect("Failed to compile help regex"));

/// A fully parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `.cid <uid>`: formatted player profile lookup.
    PlayerInfo { uid: String },
    /// `.tp <uid>`: start the top-up flow.
    TopUp { uid: String },
    /// `.gor`: start the general-order flow.
    GeneralOrder,
    /// `.cd`: user/chat id details.
    ChatDetails,
    /// `.ping`: liveness check.
    Ping,
    /// `.help`: command list.
    Help,
}

/// Parse message text into a [`Command`], if it matches one.
pub fn parse(text: &str) -> Option<Command> {
    if let Some(caps) = CID_REGEX.captures(text) {
        return Some(Command::PlayerInfo {
            uid: caps[1].to_string(),
        });
    }
    if let Some(caps) = TP_REGEX.captures(text) {
        return Some(Command::TopUp {
            uid: caps[1].to_string(),
        });
    }
    if GOR_REGEX.is_match(text) {
        return Some(Command::GeneralOrder);
    }
    if CD_REGEX.is_match(text) {
        return Some(Command::ChatDetails);
    }
    if PING_REGEX.is_match(text) {
        return Some(Command::Ping);
    }
    if HELP_REGEX.is_match(text) {
        return Some(Command::Help);
    }
    None
}

pub const NOT_AUTHORIZED: &str = "```\n❌ You are not authorized to use this bot.\n```";
pub const FETCHING_PLAYER_DETAILS: &str = "🔍 Fetching player details...";
pub const FETCHING_PLAYER_INFO: &str = "🔍 Fetching player info...";
pub const PONG: &str = "```\n🏓 Pong! Bot is alive!\n```";
pub const API_UNAVAILABLE: &str = "```\nError: Unable to fetch data from API.\n```";

/// `.cid` error variant, without the ❌ prefix the flows use.
pub fn cid_player_not_found(uid: &str) -> String {
    format!("```\nError: Player not found. UID: {}\n```", uid)
}

pub const HELP_TEXT: &str = "```\n\
🤖 Free Fire Userbot Commands\n\
═══════════════════════════════\n\
\n\
.Cid [UID]\n\
  → Get Free Fire player details\n\
  → Example: .Cid 2716319203\n\
\n\
.tp [UID]\n\
  → Process top-up order\n\
  → Example: .tp 2716319203\n\
\n\
.gor\n\
  → Process general order\n\
\n\
.cd\n\
  → Get chat/user ID details\n\
\n\
.ping\n\
  → Check if bot is alive\n\
\n\
.help\n\
  → Show this help message\n\
```";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_cid_with_uid() {
        assert_eq!(
            parse(".cid 2716319203"),
            Some(Command::PlayerInfo {
                uid: "2716319203".to_string()
            })
        );
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(
            parse(".Cid 123"),
            Some(Command::PlayerInfo {
                uid: "123".to_string()
            })
        );
        assert_eq!(parse(".PING"), Some(Command::Ping));
        assert_eq!(parse(".Gor"), Some(Command::GeneralOrder));
    }

    #[test]
    fn parses_tp_with_uid() {
        assert_eq!(
            parse(".tp 42"),
            Some(Command::TopUp {
                uid: "42".to_string()
            })
        );
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse(".cd"), Some(Command::ChatDetails));
        assert_eq!(parse(".help"), Some(Command::Help));
    }

    #[test]
    fn rejects_non_numeric_uid() {
        assert_eq!(parse(".cid abc"), None);
        assert_eq!(parse(".tp 12x"), None);
    }

    #[test]
    fn rejects_trailing_text() {
        assert_eq!(parse(".ping now"), None);
        assert_eq!(parse(".gor please"), None);
        assert_eq!(parse(".cid 123 extra"), None);
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("hello"), None);
        assert_eq!(parse("y"), None);
        assert_eq!(parse(""), None);
    }
}
