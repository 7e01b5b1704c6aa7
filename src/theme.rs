//! Theme selection and persistence

use std::fmt;
use std::str::FromStr;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::store::{
    KeyValueStore,
    keys,
};
use crate::translation::TranslationKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme '{0}'")]
pub struct UnknownThemeId(pub String);

/// Identifier of a selectable colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
    Xmas,
    Pinky,
    Halloween,
}

impl ThemeId {
    pub const ALL: [Self; 5] = [Self::Light, Self::Dark, Self::Xmas, Self::Pinky, Self::Halloween];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Xmas => "xmas",
            Self::Pinky => "pinky",
            Self::Halloween => "halloween",
        }
    }

    #[must_use]
    pub const fn label_key(self) -> TranslationKey {
        match self {
            Self::Light => TranslationKey::LightTheme,
            Self::Dark => TranslationKey::DarkTheme,
            Self::Xmas => TranslationKey::ChristmasTheme,
            Self::Pinky => TranslationKey::PinkyTheme,
            Self::Halloween => TranslationKey::HalloweenTheme,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = UnknownThemeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s.trim())
            .ok_or_else(|| UnknownThemeId(s.to_string()))
    }
}

/// Holds the active theme and mirrors it to the `theme` store key.
pub struct ThemeProvider {
    /// Persistent store
    store: Arc<dyn KeyValueStore>,
    /// Active theme
    current: RwLock<ThemeId>,
}

impl fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("store", &"<dyn KeyValueStore>")
            .field("current", &self.theme())
            .finish()
    }
}

impl ThemeProvider {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, current: RwLock::new(ThemeId::default()) }
    }

    /// Restores the stored theme. Unknown ids fall back to the light theme.
    pub async fn load(&self) {
        match self.store.get(keys::THEME).await {
            Ok(Some(raw)) => {
                let theme = raw.parse::<ThemeId>().unwrap_or_else(|error| {
                    tracing::warn!(%error, "Stored theme is not recognised, using default");
                    ThemeId::default()
                });
                self.set_current(theme);
            }
            Ok(None) => tracing::debug!("No stored theme"),
            Err(error) => tracing::error!(%error, "Failed to load theme"),
        }
    }

    #[must_use]
    pub fn theme(&self) -> ThemeId {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub const fn themes(&self) -> &'static [ThemeId] {
        &ThemeId::ALL
    }

    /// Switches the active theme, then persists it. A failed write is logged and otherwise ignored.
    pub async fn select_theme(&self, theme: ThemeId) {
        self.set_current(theme);
        if let Err(error) = self.store.set(keys::THEME, theme.as_str()).await {
            tracing::error!(%error, theme = %theme, "Failed to save theme");
        }
    }

    /// Back to the default theme, without touching storage.
    pub fn reset(&self) {
        self.set_current(ThemeId::default());
    }

    fn set_current(&self, theme: ThemeId) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = theme;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::store::MemoryStore;

    #[rstest]
    #[case("light", ThemeId::Light)]
    #[case("xmas", ThemeId::Xmas)]
    #[case("halloween", ThemeId::Halloween)]
    fn test_parse_theme_id(#[case] raw: &str, #[case] expected: ThemeId) {
        assert_eq!(raw.parse::<ThemeId>(), Ok(expected));
    }

    #[rstest]
    fn test_parse_unknown_theme_id() {
        assert_eq!("sepia".parse::<ThemeId>(), Err(UnknownThemeId("sepia".to_string())));
    }

    #[tokio::test]
    async fn test_load_restores_stored_theme() {
        let store = Arc::new(MemoryStore::with_entries([(keys::THEME, "pinky")]));
        let provider = ThemeProvider::new(store);

        provider.load().await;

        assert_eq!(provider.theme(), ThemeId::Pinky);
    }

    #[tokio::test]
    async fn test_load_unknown_theme_falls_back_to_light() {
        let store = Arc::new(MemoryStore::with_entries([(keys::THEME, "neon")]));
        let provider = ThemeProvider::new(store);
        provider.set_current(ThemeId::Dark);

        provider.load().await;

        assert_eq!(provider.theme(), ThemeId::Light);
    }

    #[tokio::test]
    async fn test_select_theme_persists() {
        let store = Arc::new(MemoryStore::new());
        let provider = ThemeProvider::new(store.clone());

        provider.select_theme(ThemeId::Halloween).await;

        assert_eq!(provider.theme(), ThemeId::Halloween);
        assert_eq!(store.get(keys::THEME).await.unwrap().as_deref(), Some("halloween"));
    }

    #[tokio::test]
    async fn test_reset_keeps_storage() {
        let store = Arc::new(MemoryStore::new());
        let provider = ThemeProvider::new(store.clone());
        provider.select_theme(ThemeId::Dark).await;

        provider.reset();

        assert_eq!(provider.theme(), ThemeId::Light);
        assert_eq!(store.get(keys::THEME).await.unwrap().as_deref(), Some("dark"));
    }
}
