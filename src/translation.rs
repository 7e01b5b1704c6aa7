//! UI string keys and per-language dictionaries

mod defaults;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

pub use defaults::{
    default_cache,
    default_dictionary,
};

use crate::language::LanguageCode;

/// Key → localized string for one language. Partial for every language except English.
pub type Dictionary = BTreeMap<TranslationKey, String>;

/// Language code → (partial) dictionary.
pub type TranslationCache = BTreeMap<LanguageCode, Dictionary>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown translation key '{0}'")]
pub struct UnknownTranslationKey(pub String);

/// The closed set of UI string identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationKey {
    Welcome,
    NextStep,
    ChristmasTheme,
    DarkTheme,
    PinkyTheme,
    LightTheme,
    HalloweenTheme,
    English,
    Vietnamese,
    Spanish,
    French,
    German,
    Japanese,
    Korean,
    Chinese,
    Language,
    Theme,
    Settings,
    Loading,
    Translating,
    Error,
    RemoveCache,
    CacheRemoved,
    RemoveCacheConfirm,
    Connecting,
    CurrentStep,
    SendingTranslationRequest,
    ProcessingTranslation,
    ReceivingTranslationData,
    ParsingTranslationResults,
    NoTranslationReceived,
    #[serde(rename = "invalidJSONResponse")]
    InvalidJsonResponse,
    TranslationFailed,
    TranslatingTo,
    TranslationComplete,
    ReturningToHome,
    PreparingTranslation,
}

impl TranslationKey {
    pub const ALL: [Self; 37] = [
        Self::Welcome,
        Self::NextStep,
        Self::ChristmasTheme,
        Self::DarkTheme,
        Self::PinkyTheme,
        Self::LightTheme,
        Self::HalloweenTheme,
        Self::English,
        Self::Vietnamese,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Japanese,
        Self::Korean,
        Self::Chinese,
        Self::Language,
        Self::Theme,
        Self::Settings,
        Self::Loading,
        Self::Translating,
        Self::Error,
        Self::RemoveCache,
        Self::CacheRemoved,
        Self::RemoveCacheConfirm,
        Self::Connecting,
        Self::CurrentStep,
        Self::SendingTranslationRequest,
        Self::ProcessingTranslation,
        Self::ReceivingTranslationData,
        Self::ParsingTranslationResults,
        Self::NoTranslationReceived,
        Self::InvalidJsonResponse,
        Self::TranslationFailed,
        Self::TranslatingTo,
        Self::TranslationComplete,
        Self::ReturningToHome,
        Self::PreparingTranslation,
    ];

    /// Keys every language ships with, so the progress screen is readable
    /// before the rest of the dictionary has been fetched.
    pub const PROGRESS: [Self; 13] = [
        Self::Connecting,
        Self::CurrentStep,
        Self::SendingTranslationRequest,
        Self::ProcessingTranslation,
        Self::ReceivingTranslationData,
        Self::ParsingTranslationResults,
        Self::NoTranslationReceived,
        Self::InvalidJsonResponse,
        Self::TranslationFailed,
        Self::TranslatingTo,
        Self::TranslationComplete,
        Self::ReturningToHome,
        Self::PreparingTranslation,
    ];

    /// Wire name, as used in stored caches and model payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::NextStep => "nextStep",
            Self::ChristmasTheme => "christmasTheme",
            Self::DarkTheme => "darkTheme",
            Self::PinkyTheme => "pinkyTheme",
            Self::LightTheme => "lightTheme",
            Self::HalloweenTheme => "halloweenTheme",
            Self::English => "english",
            Self::Vietnamese => "vietnamese",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
            Self::Chinese => "chinese",
            Self::Language => "language",
            Self::Theme => "theme",
            Self::Settings => "settings",
            Self::Loading => "loading",
            Self::Translating => "translating",
            Self::Error => "error",
            Self::RemoveCache => "removeCache",
            Self::CacheRemoved => "cacheRemoved",
            Self::RemoveCacheConfirm => "removeCacheConfirm",
            Self::Connecting => "connecting",
            Self::CurrentStep => "currentStep",
            Self::SendingTranslationRequest => "sendingTranslationRequest",
            Self::ProcessingTranslation => "processingTranslation",
            Self::ReceivingTranslationData => "receivingTranslationData",
            Self::ParsingTranslationResults => "parsingTranslationResults",
            Self::NoTranslationReceived => "noTranslationReceived",
            Self::InvalidJsonResponse => "invalidJSONResponse",
            Self::TranslationFailed => "translationFailed",
            Self::TranslatingTo => "translatingTo",
            Self::TranslationComplete => "translationComplete",
            Self::ReturningToHome => "returningToHome",
            Self::PreparingTranslation => "preparingTranslation",
        }
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationKey {
    type Err = UnknownTranslationKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownTranslationKey(s.to_string()))
    }
}

/// Converts a dictionary into a JSON object keyed by wire names.
#[must_use]
pub fn dictionary_to_json(dictionary: &Dictionary) -> Value {
    Value::Object(
        dictionary
            .iter()
            .map(|(key, text)| (key.as_str().to_string(), Value::String(text.clone())))
            .collect(),
    )
}

/// Reads a dictionary out of a loosely typed JSON object.
///
/// Unknown keys and non-string values are skipped; their names are returned
/// alongside the dictionary so callers can log them.
#[must_use]
pub fn dictionary_from_json(object: &Map<String, Value>) -> (Dictionary, Vec<String>) {
    let mut dictionary = Dictionary::new();
    let mut skipped = Vec::new();

    for (raw_key, value) in object {
        match (raw_key.parse::<TranslationKey>(), value) {
            (Ok(key), Value::String(text)) => {
                dictionary.insert(key, text.clone());
            }
            _ => skipped.push(raw_key.clone()),
        }
    }

    (dictionary, skipped)
}
