//! Discrete commands a user interface sends to a session.

use serde::{Deserialize, Serialize};

use story_graph::Tone;

/// One user event, decoupled from whatever widget produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Take the choice at this index of the current scene.
    Choose { index: usize },
    Back,
    Restart,
    /// Free-text input.
    Submit { text: String },
    SetTone(Tone),
    /// Emit a diagnostic analytics event.
    DebugEmit,
}

impl Command {
    /// Map a line of terminal input to a command.
    ///
    /// Numbers pick a choice (1-based), `/back`, `/restart`, `/tone <gentle|snark>` and
    /// `/debug` are commands, anything else is free text. Returns `None` for blank
    /// lines and unrecognised slash commands.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Ok(number) = line.parse::<usize>() {
            return number
                .checked_sub(1)
                .map(|index| Command::Choose { index });
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Submit {
                text: line.to_string(),
            });
        };

        let mut words = rest.split_whitespace();
        match words.next()? {
            "back" | "b" => Some(Command::Back),
            "restart" | "r" => Some(Command::Restart),
            "debug" => Some(Command::DebugEmit),
            "tone" => words.next()?.parse().ok().map(Command::SetTone),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_numbers() {
        assert_eq!(Command::parse_line("1"), Some(Command::Choose { index: 0 }));
        assert_eq!(Command::parse_line(" 3 "), Some(Command::Choose { index: 2 }));
        assert_eq!(Command::parse_line("0"), None);
    }

    #[test]
    fn test_parse_slash_commands() {
        assert_eq!(Command::parse_line("/back"), Some(Command::Back));
        assert_eq!(Command::parse_line("/r"), Some(Command::Restart));
        assert_eq!(Command::parse_line("/debug"), Some(Command::DebugEmit));
        assert_eq!(
            Command::parse_line("/tone snark"),
            Some(Command::SetTone(Tone::Snark))
        );
        assert_eq!(Command::parse_line("/tone"), None);
        assert_eq!(Command::parse_line("/dance"), None);
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(
            Command::parse_line("  why is the door locked? "),
            Some(Command::Submit {
                text: "why is the door locked?".to_string()
            })
        );
        assert_eq!(Command::parse_line("   "), None);
    }
}
