//! Locale applied to the resources the platform uses to render the prompt.

use std::fmt;

/// A locale string of this many characters carries a region, e.g. `zh_HK`.
const REGIONAL_LOCALE_LEN: usize = 5;

/// Length of the language and region parts of a regional locale string.
const PART_LEN: usize = 2;

/// Language and optional region the prompt should be rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Record)]
pub struct DialogLocale {
    /// Lowercase language code, e.g. `zh`.
    pub language: String,
    /// Uppercase region code, e.g. `HK`, when the locale string carried one.
    pub region: Option<String>,
}

impl DialogLocale {
    /// Parses a host locale string.
    ///
    /// A string of exactly five characters is split positionally into a
    /// language (first two) and a region (last two), so `zh_HK` and `pt-BR`
    /// both carry a region. Any other length is taken as a bare language code.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() == REGIONAL_LOCALE_LEN {
            let language: String = chars[..PART_LEN].iter().collect();
            let region: String = chars[chars.len() - PART_LEN..].iter().collect();
            return Self {
                language: language.to_lowercase(),
                region: Some(region.to_uppercase()),
            };
        }

        Self {
            language: code.to_lowercase(),
            region: None,
        }
    }
}

impl fmt::Display for DialogLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

/// Parses a host locale string into a [`DialogLocale`].
#[uniffi::export]
#[must_use]
pub fn parse_dialog_locale(code: &str) -> DialogLocale {
    DialogLocale::parse(code)
}
