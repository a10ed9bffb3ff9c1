//! The fixed set of languages the tutor offers.

use crate::error::{Result, TutorError};
use crate::ui::Style;

/// A language the tutor can practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: &'static str,
    /// English name, embedded into the system instruction.
    pub name: &'static str,
}

/// Supported languages, in selector order.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language {
        code: "es",
        name: "Spanish",
    },
    Language {
        code: "fr",
        name: "French",
    },
    Language {
        code: "de",
        name: "German",
    },
    Language {
        code: "ja",
        name: "Japanese",
    },
    Language {
        code: "it",
        name: "Italian",
    },
    Language {
        code: "pt",
        name: "Portuguese",
    },
];

/// Language selected when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "Spanish";

/// Looks up a language by name or code, ignoring ASCII case.
pub fn find_language(input: &str) -> Option<&'static Language> {
    let input = input.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.name.eq_ignore_ascii_case(input) || lang.code.eq_ignore_ascii_case(input))
}

/// Validates that the given language is supported.
pub fn validate_language(input: &str) -> Result<&'static Language> {
    find_language(input).ok_or_else(|| TutorError::UnsupportedLanguage(input.to_string()))
}

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for lang in SUPPORTED_LANGUAGES {
        let marker = if lang.name == DEFAULT_LANGUAGE {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!("  {:3} {}{marker}", Style::code(lang.code), Style::value(lang.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_language_by_name_and_code() {
        assert_eq!(find_language("Spanish").map(|l| l.code), Some("es"));
        assert_eq!(find_language("japanese").map(|l| l.code), Some("ja"));
        assert_eq!(find_language("PT").map(|l| l.name), Some("Portuguese"));
        assert_eq!(find_language("  de ").map(|l| l.name), Some("German"));
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("Klingon").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("zh").is_err());
    }

    #[test]
    fn test_default_language_is_first() {
        assert_eq!(SUPPORTED_LANGUAGES[0].name, DEFAULT_LANGUAGE);
    }
}
