//! Active language and the lazily filled translation cache

use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use serde_json::{
    Map,
    Value,
};
use tokio::sync::Mutex;

use crate::config::ProgressSettings;
use crate::language::{
    Language,
    LanguageCode,
};
use crate::model::GenerativeModel;
use crate::navigation::{
    Navigator,
    Route,
};
use crate::progress::{
    ProgressNotifier,
    StepLabels,
};
use crate::requester::{
    TranslateError,
    TranslationRequester,
};
use crate::store::{
    KeyValueStore,
    StoreError,
    keys,
};
use crate::translation::{
    Dictionary,
    TranslationCache,
    TranslationKey,
    default_cache,
    dictionary_from_json,
    dictionary_to_json,
};

/// Result of [`LanguageProvider::select_language`].
#[derive(Debug)]
pub enum SelectionOutcome {
    /// Every key was already cached; nothing was requested.
    AlreadyAvailable { language: Language },
    /// Missing keys were fetched and merged into the cache.
    Translated { language: Language, keys: Vec<TranslationKey> },
    /// The fetch failed; the cache is unchanged but the language stays selected.
    Failed { language: Language, error: TranslateError },
}

impl SelectionOutcome {
    #[must_use]
    pub const fn language(&self) -> Language {
        match self {
            Self::AlreadyAvailable { language }
            | Self::Translated { language, .. }
            | Self::Failed { language, .. } => *language,
        }
    }
}

/// Mutable part of the provider
#[derive(Debug, Clone)]
struct ProviderState {
    /// Active language
    language: Language,
    /// Language code → partial dictionary, seeded from the built-in defaults
    translations: TranslationCache,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self { language: Language::ENGLISH, translations: default_cache() }
    }
}

/// Looks up UI strings for the active language and fetches the missing ones on demand.
///
/// Fetched dictionaries are merged into the in-memory cache and flushed to the
/// `translations-cache` store key. Translations run one at a time.
pub struct LanguageProvider {
    /// Persistent store
    store: Arc<dyn KeyValueStore>,
    /// Remote translation client
    requester: TranslationRequester,
    /// Display layer
    navigator: Arc<dyn Navigator>,
    /// Progress of the running translation
    notifier: ProgressNotifier,
    /// Active language and cache
    state: RwLock<ProviderState>,
    /// Held for the duration of a fetch
    translation_gate: Mutex<()>,
}

impl fmt::Debug for LanguageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProvider")
            .field("language", &self.language().code)
            .field("requester", &self.requester)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl LanguageProvider {
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        model: Arc<dyn GenerativeModel>,
        navigator: Arc<dyn Navigator>,
        progress: &ProgressSettings,
    ) -> Self {
        Self {
            store,
            requester: TranslationRequester::new(model, *progress),
            navigator,
            notifier: ProgressNotifier::new(progress.channel_capacity),
            state: RwLock::new(ProviderState::default()),
            translation_gate: Mutex::new(()),
        }
    }

    /// Restores the stored language and overlays the stored cache on the defaults.
    ///
    /// Unreadable or unrecognised entries are logged and skipped.
    pub async fn load(&self) {
        match self.store.get(keys::LANGUAGE).await {
            Ok(Some(raw)) => match raw.parse::<LanguageCode>() {
                Ok(code) => self.write_state().language = Language::from_code(code),
                Err(error) => tracing::warn!(%error, "Stored language is not recognised, keeping English"),
            },
            Ok(None) => tracing::debug!("No stored language"),
            Err(error) => tracing::error!(%error, "Failed to load language"),
        }

        let stored = match self.stored_cache().await {
            Ok(stored) => stored,
            Err(error) => {
                tracing::error!(%error, "Failed to load translations cache");
                return;
            }
        };

        let mut loaded = 0_usize;
        for (raw_code, entry) in &stored {
            let code = match raw_code.parse::<LanguageCode>() {
                Ok(LanguageCode::En) => {
                    tracing::debug!("Ignoring cached English dictionary");
                    continue;
                }
                Ok(code) => code,
                Err(error) => {
                    tracing::warn!(%error, "Skipping cached dictionary");
                    continue;
                }
            };
            let Some(object) = entry.as_object() else {
                tracing::warn!(language = %code, "Cached dictionary is not a JSON object");
                continue;
            };

            let (dictionary, skipped) = dictionary_from_json(object);
            if !skipped.is_empty() {
                tracing::warn!(language = %code, ?skipped, "Skipping unknown cached entries");
            }

            let mut state = self.write_state();
            let target = state.translations.entry(code).or_default();
            target.extend(dictionary.into_iter().filter(|(_, text)| !text.is_empty()));
            drop(state);
            loaded += 1;
        }

        tracing::info!(language = %self.language().code, cached_languages = loaded, "Language state loaded");
    }

    /// Text for `key` in `code` (or the active language).
    ///
    /// Falls back to English, then to the key name. Empty strings count as missing.
    #[must_use]
    pub fn get_string(&self, key: TranslationKey, code: Option<LanguageCode>) -> String {
        let state = self.read_state();
        let code = code.unwrap_or(state.language.code);
        let lookup = |code: LanguageCode| {
            state.translations.get(&code).and_then(|dictionary| dictionary.get(&key)).filter(|text| !text.is_empty())
        };

        lookup(code)
            .or_else(|| lookup(LanguageCode::En))
            .map_or_else(|| key.as_str().to_string(), Clone::clone)
    }

    /// English keys with no usable text for `code`. Always empty for English.
    #[must_use]
    pub fn missing_keys(&self, code: LanguageCode) -> Vec<TranslationKey> {
        if code == LanguageCode::En {
            return Vec::new();
        }

        let state = self.read_state();
        let Some(english) = state.translations.get(&LanguageCode::En) else {
            return Vec::new();
        };
        let target = state.translations.get(&code);

        english
            .keys()
            .filter(|key| {
                target
                    .and_then(|dictionary| dictionary.get(*key))
                    .is_none_or(String::is_empty)
            })
            .copied()
            .collect()
    }

    /// Switches the active language and fetches whatever is missing for it.
    ///
    /// The switch and its persistence happen before any fetch and are not
    /// rolled back on failure. A call made while another translation is in
    /// flight waits for it and then re-checks what is still missing.
    pub async fn select_language(&self, language: Language) -> SelectionOutcome {
        let code = language.code;
        self.write_state().language = language;
        if let Err(error) = self.store.set(keys::LANGUAGE, code.as_str()).await {
            tracing::error!(%error, language = %code, "Failed to save language");
        }

        if language.is_source() {
            return SelectionOutcome::AlreadyAvailable { language };
        }

        let _gate = self.translation_gate.lock().await;

        let missing = self.missing_keys(code);
        if missing.is_empty() {
            tracing::debug!(language = %code, "All keys cached");
            return SelectionOutcome::AlreadyAvailable { language };
        }

        tracing::info!(language = %code, missing = missing.len(), "Fetching missing translations");
        self.navigator.navigate(Route::Translating { code });

        let source = self.english_subset(&missing);
        let labels = StepLabels::resolve(|key| self.get_string(key, Some(code)));

        let outcome = match self.requester.translate(language, &source, &labels, &self.notifier).await {
            Ok(fresh) => {
                let keys: Vec<_> = fresh.keys().copied().collect();
                let merged = self.merge(code, fresh);
                self.persist_dictionary(code, &merged).await;
                SelectionOutcome::Translated { language, keys }
            }
            Err(error) => {
                tracing::error!(%error, language = %code, "Keeping cached translations");
                SelectionOutcome::Failed { language, error }
            }
        };

        self.navigator.navigate(Route::Home);
        outcome
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.read_state().language
    }

    #[must_use]
    pub const fn languages(&self) -> &'static [Language] {
        &Language::ALL
    }

    /// Cached dictionary for `code`.
    #[must_use]
    pub fn translations(&self, code: LanguageCode) -> Dictionary {
        self.read_state().translations.get(&code).cloned().unwrap_or_default()
    }

    #[must_use]
    pub const fn progress(&self) -> &ProgressNotifier {
        &self.notifier
    }

    /// Back to English and the built-in dictionaries, without touching storage.
    pub fn reset(&self) {
        *self.write_state() = ProviderState::default();
        self.notifier.clear();
    }

    /// English texts for `keys`.
    fn english_subset(&self, keys: &[TranslationKey]) -> Dictionary {
        let state = self.read_state();
        let english = state.translations.get(&LanguageCode::En);
        keys.iter()
            .filter_map(|key| english.and_then(|dictionary| dictionary.get(key)).map(|text| (*key, text.clone())))
            .collect()
    }

    /// Overwrites the fetched keys of `code` and returns the resulting dictionary.
    fn merge(&self, code: LanguageCode, fresh: Dictionary) -> Dictionary {
        let mut state = self.write_state();
        let dictionary = state.translations.entry(code).or_default();
        dictionary.extend(fresh);
        dictionary.clone()
    }

    /// Stores `dictionary` under `code` in the persisted cache, keeping other languages.
    async fn persist_dictionary(&self, code: LanguageCode, dictionary: &Dictionary) {
        let mut stored = match self.stored_cache().await {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(%error, "Rewriting translations cache from scratch");
                Map::new()
            }
        };
        stored.insert(code.as_str().to_string(), dictionary_to_json(dictionary));

        let serialized = Value::Object(stored).to_string();
        match self.store.set(keys::TRANSLATIONS_CACHE, &serialized).await {
            Ok(()) => tracing::debug!(language = %code, keys = dictionary.len(), "Translations cache saved"),
            Err(error) => tracing::error!(%error, language = %code, "Failed to save translations cache"),
        }
    }

    /// The stored cache object. Absent or malformed JSON reads as empty.
    async fn stored_cache(&self) -> Result<Map<String, Value>, StoreError> {
        let Some(raw) = self.store.get(keys::TRANSLATIONS_CACHE).await? else {
            return Ok(Map::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => {
                tracing::warn!("Stored translations cache is not a JSON object");
                Ok(Map::new())
            }
            Err(error) => {
                tracing::warn!(%error, "Stored translations cache is not valid JSON");
                Ok(Map::new())
            }
        }
    }

    /// Shared access to the state
    fn read_state(&self) -> RwLockReadGuard<'_, ProviderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to the state
    fn write_state(&self) -> RwLockWriteGuard<'_, ProviderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
