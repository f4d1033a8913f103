use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::caller::Call;

/// Language the caller announces numbers in.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Played from recorded clips.
    #[default]
    Amharic,
    English,
    Tigrinya,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Amharic => "Amharic",
            Language::English => "English",
            Language::Tigrinya => "Tigrinya",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amharic" | "am" => Ok(Language::Amharic),
            "english" | "en" => Ok(Language::English),
            "tigrinya" | "ti" => Ok(Language::Tigrinya),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// What an announcer should render for a call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Announcement {
    /// Text for a speech synthesizer.
    Speech { text: String, lang: &'static str },
    /// File name of a recorded clip.
    Clip(String),
}

pub fn announcement(call: Call, language: Language) -> Announcement {
    match language {
        Language::Amharic => Announcement::Clip(format!(
            "{}_{}.mp3",
            call.column.letter().to_ascii_lowercase(),
            call.number
        )),
        Language::English => Announcement::Speech {
            text: format!("{}. {}.", call.column, call.number),
            lang: "en",
        },
        Language::Tigrinya => Announcement::Speech {
            text: format!("{}. {}.", call.column, call.number),
            lang: "ti",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amharic_uses_recorded_clip_names() {
        let call = Call::new(12).unwrap();
        assert_eq!(
            announcement(call, Language::Amharic),
            Announcement::Clip("b_12.mp3".into())
        );
    }

    #[test]
    fn english_speaks_column_then_number() {
        let call = Call::new(64).unwrap();
        assert_eq!(
            announcement(call, Language::English),
            Announcement::Speech {
                text: "O. 64.".into(),
                lang: "en"
            }
        );
    }

    #[test]
    fn language_parses_codes_and_names() {
        assert_eq!("ti".parse::<Language>(), Ok(Language::Tigrinya));
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert!("klingon".parse::<Language>().is_err());
    }
}
