//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit`, `q!` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `parity [odd\|even]` | Set the timetable week, or toggle it |
//! | `schedule` | Show or hide the timetable |
//! | `clear` | Clear the query and drop cached credential results |

use crate::{app::AppState, theme::{Theme, THEME_NAMES}};
use lookup_core::Parity;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    /// `None` toggles.
    Parity(Option<Parity>),
    Schedule,
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close without
    /// acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "schedule" => Ok(Command::Schedule),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
                } else if Theme::by_name(rest).is_none() {
                    Err(format!("unknown theme: {rest}"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "parity" if rest.is_empty() => Ok(Command::Parity(None)),
            "parity" => Parity::parse(rest)
                .map(|p| Command::Parity(Some(p)))
                .ok_or_else(|| "usage: parity [odd|even]".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            if let Some(theme) = Theme::by_name(&name) {
                s.theme = theme;
            }
        }
        Command::Parity(Some(parity)) => s.session.set_parity(parity),
        Command::Parity(None) => {
            s.session.toggle_parity();
        }
        Command::Schedule => s.show_schedule = !s.show_schedule,
        Command::Clear => {
            s.clear_query();
            s.session.clear_cache();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("q!"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(Command::parse("theme gruvbox"), Ok(Command::Theme("gruvbox".to_string())));
        assert!(Command::parse("theme").is_err());
        assert!(Command::parse("theme neon").unwrap_err().contains("neon"));
    }

    #[test]
    fn parse_parity() {
        assert_eq!(Command::parse("parity"), Ok(Command::Parity(None)));
        assert_eq!(Command::parse("parity even"), Ok(Command::Parity(Some(Parity::Even))));
        assert_eq!(Command::parse("parity 单周"), Ok(Command::Parity(Some(Parity::Odd))));
        assert!(Command::parse("parity weekly").is_err());
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
