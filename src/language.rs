//! Supported UI languages.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::translation::TranslationKey;

/// Returned when a stored or user supplied code is not one of [`LanguageCode::ALL`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language code '{0}'")]
pub struct UnknownLanguageCode(pub String);

/// Short identifier selecting a translation dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Vi,
    Es,
    Fr,
    De,
    Ja,
    Ko,
    Zh,
}

impl LanguageCode {
    pub const ALL: [Self; 8] =
        [Self::En, Self::Vi, Self::Es, Self::Fr, Self::De, Self::Ja, Self::Ko, Self::Zh];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = UnknownLanguageCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLanguageCode(s.to_string()))
    }
}

/// A selectable UI language.
///
/// There is exactly one value per [`LanguageCode`]; English is the source
/// language whose dictionary is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub code: LanguageCode,
    /// English display name, used in the translation prompt.
    pub name: &'static str,
    pub native_name: &'static str,
}

impl Language {
    pub const ENGLISH: Self = Self::from_code(LanguageCode::En);

    pub const ALL: [Self; 8] = [
        Self::from_code(LanguageCode::En),
        Self::from_code(LanguageCode::Vi),
        Self::from_code(LanguageCode::Es),
        Self::from_code(LanguageCode::Fr),
        Self::from_code(LanguageCode::De),
        Self::from_code(LanguageCode::Ja),
        Self::from_code(LanguageCode::Ko),
        Self::from_code(LanguageCode::Zh),
    ];

    #[must_use]
    pub const fn from_code(code: LanguageCode) -> Self {
        let (name, native_name) = match code {
            LanguageCode::En => ("English", "English"),
            LanguageCode::Vi => ("Vietnamese", "Tiếng Việt"),
            LanguageCode::Es => ("Spanish", "Español"),
            LanguageCode::Fr => ("French", "Français"),
            LanguageCode::De => ("German", "Deutsch"),
            LanguageCode::Ja => ("Japanese", "日本語"),
            LanguageCode::Ko => ("Korean", "한국어"),
            LanguageCode::Zh => ("Chinese", "中文"),
        };
        Self { code, name, native_name }
    }

    /// Whether this is the source language all other dictionaries are translated from.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(self.code, LanguageCode::En)
    }

    /// Key of the UI label shown on this language's selection button.
    #[must_use]
    pub const fn label_key(self) -> TranslationKey {
        match self.code {
            LanguageCode::En => TranslationKey::English,
            LanguageCode::Vi => TranslationKey::Vietnamese,
            LanguageCode::Es => TranslationKey::Spanish,
            LanguageCode::Fr => TranslationKey::French,
            LanguageCode::De => TranslationKey::German,
            LanguageCode::Ja => TranslationKey::Japanese,
            LanguageCode::Ko => TranslationKey::Korean,
            LanguageCode::Zh => TranslationKey::Chinese,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl From<LanguageCode> for Language {
    fn from(code: LanguageCode) -> Self {
        Self::from_code(code)
    }
}
