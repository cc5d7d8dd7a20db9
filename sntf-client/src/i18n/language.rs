//! Active language and text direction.

use std::fmt;
use std::str::FromStr;

/// Error returned for a language code the client has no strings for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

/// A display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Fr,
    Ar,
}

/// Text direction of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::Ar];

    /// Parse an ISO 639-1 code ("fr" or "ar").
    pub fn from_code(code: &str) -> Result<Self, UnknownLanguage> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "ar" => Ok(Language::Ar),
            _ => Err(UnknownLanguage(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }

    /// Arabic is right-to-left; everything else is left-to-right.
    pub fn direction(&self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::Fr => Direction::Ltr,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Direction {
    /// Value of the HTML `dir` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!(Language::from_code("fr").unwrap(), Language::Fr);
        assert_eq!(Language::from_code("AR").unwrap(), Language::Ar);
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Ar);
        assert!(Language::from_code("en").is_err());
    }

    #[test]
    fn direction_per_language() {
        assert_eq!(Language::Ar.direction(), Direction::Rtl);
        assert_eq!(Language::Fr.direction(), Direction::Ltr);
        assert_eq!(Language::Ar.direction().to_string(), "rtl");
    }

    #[test]
    fn default_is_french() {
        assert_eq!(Language::default(), Language::Fr);
        assert_eq!(Language::default().code(), "fr");
    }
}
