//! Application shell wiring the providers to one store

use std::fmt;
use std::sync::Arc;

use crate::config::TranslatorSettings;
use crate::model::GenerativeModel;
use crate::navigation::Navigator;
use crate::provider::LanguageProvider;
use crate::store::{
    KeyValueStore,
    StoreError,
    keys,
};
use crate::theme::ThemeProvider;
use crate::translation::TranslationKey;

/// Language and theme state sharing one persistent store.
pub struct App {
    /// Shared store
    store: Arc<dyn KeyValueStore>,
    /// Language and translations
    language: LanguageProvider,
    /// Selected theme
    theme: ThemeProvider,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("store", &"<dyn KeyValueStore>")
            .field("language", &self.language)
            .field("theme", &self.theme)
            .finish()
    }
}

impl App {
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        model: Arc<dyn GenerativeModel>,
        navigator: Arc<dyn Navigator>,
        settings: &TranslatorSettings,
    ) -> Self {
        Self {
            language: LanguageProvider::new(store.clone(), model, navigator, &settings.progress),
            theme: ThemeProvider::new(store.clone()),
            store,
        }
    }

    /// Builds the app and restores the persisted state.
    pub async fn start(
        store: Arc<dyn KeyValueStore>,
        model: Arc<dyn GenerativeModel>,
        navigator: Arc<dyn Navigator>,
        settings: &TranslatorSettings,
    ) -> Self {
        let app = Self::new(store, model, navigator, settings);
        app.load().await;
        app
    }

    pub async fn load(&self) {
        self.language.load().await;
        self.theme.load().await;
    }

    #[must_use]
    pub const fn language(&self) -> &LanguageProvider {
        &self.language
    }

    #[must_use]
    pub const fn theme(&self) -> &ThemeProvider {
        &self.theme
    }

    /// Removes the persisted language, theme and translations, then resets
    /// both providers to their defaults.
    ///
    /// Returns the "cache removed" message in the language active before the reset.
    ///
    /// # Errors
    /// A key could not be removed. Keys removed before the failure stay removed
    /// and the in-memory state is left as it was.
    pub async fn remove_cache(&self) -> Result<String, StoreError> {
        let message = self.language.get_string(TranslationKey::CacheRemoved, None);

        for key in keys::ALL {
            self.store.remove(key).await?;
        }

        self.language.reset();
        self.theme.reset();
        tracing::info!("Cache removed");

        Ok(message)
    }
}
