//! 言語切り替えから永続化・キャッシュ削除までの一連の流れに関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::time::Duration;

use async_trait::async_trait;
use lazy_ui_translator::App;
use lazy_ui_translator::SelectionOutcome;
use lazy_ui_translator::config::TranslatorSettings;
use lazy_ui_translator::language::{
    Language,
    LanguageCode,
};
use lazy_ui_translator::model::{
    GenerativeModel,
    ModelError,
};
use lazy_ui_translator::navigation::{
    Route,
    RouteHistory,
};
use lazy_ui_translator::requester::TranslateError;
use lazy_ui_translator::store::{
    FileStore,
    KeyValueStore,
    keys,
};
use lazy_ui_translator::theme::ThemeId;
use lazy_ui_translator::translation::{
    TranslationKey,
    default_dictionary,
    dictionary_from_json,
};
use serde_json::Value;
use tempfile::TempDir;

/// Answers every prompt with the English texts in brackets, after a fixed delay.
struct BracketModel {
    latency: Duration,
    calls: AtomicUsize,
}

impl BracketModel {
    fn new(latency: Duration) -> Self {
        Self { latency, calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for BracketModel {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;

        let start = prompt.find('{').unwrap();
        let end = prompt.rfind("\n\nReturn format").unwrap();
        let source: Value = serde_json::from_str(&prompt[start..end]).unwrap();
        let translated: serde_json::Map<String, Value> = source
            .as_object()
            .unwrap()
            .iter()
            .map(|(key, text)| (key.clone(), Value::String(format!("[{}]", text.as_str().unwrap()))))
            .collect();

        Ok(format!("Here is the translation:\n{}", Value::Object(translated)))
    }
}

/// Always answers with prose.
struct ChattyModel;

#[async_trait]
impl GenerativeModel for ChattyModel {
    async fn generate_content(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok("I would be happy to help with your translation!".to_string())
    }
}

fn settings() -> TranslatorSettings {
    let mut settings = TranslatorSettings::default();
    settings.progress = settings.progress.without_delays();
    settings
}

async fn start(store: &Arc<FileStore>, model: Arc<dyn GenerativeModel>, history: &Arc<RouteHistory>) -> App {
    App::start(store.clone(), model, history.clone(), &settings()).await
}

#[tokio::test(start_paused = true)]
async fn test_select_french_from_empty_cache() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(temp_dir.path().join("store.json")));
    let history = Arc::new(RouteHistory::new());
    let model = Arc::new(BracketModel::new(Duration::from_secs(2)));
    let app = start(&store, model.clone(), &history).await;
    let mut subscription = app.language().progress().subscribe();

    let outcome = app.language().select_language(Language::from_code(LanguageCode::Fr)).await;

    assert!(matches!(outcome, SelectionOutcome::Translated { .. }));
    let mut percents = Vec::new();
    while let Some(progress) = subscription.try_recv() {
        assert_eq!(progress.language.code, LanguageCode::Fr);
        percents.push(progress.percent);
    }
    assert_eq!(percents, vec![10, 25, 30, 40, 50, 60, 70, 80, 85, 95, 100]);
    assert_eq!(model.calls(), 1);
    assert_eq!(history.routes(), vec![Route::Translating { code: LanguageCode::Fr }, Route::Home]);

    let french = app.language().translations(LanguageCode::Fr);
    let english = default_dictionary(LanguageCode::En);
    assert_eq!(french.len(), english.len());
    assert_eq!(french[&TranslationKey::Welcome], format!("[{}]", english[&TranslationKey::Welcome]));
    assert_eq!(french[&TranslationKey::Connecting], default_dictionary(LanguageCode::Fr)[&TranslationKey::Connecting]);

    let raw = store.get(keys::TRANSLATIONS_CACHE).await.unwrap().unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    let (persisted, skipped) = dictionary_from_json(stored["fr"].as_object().unwrap());
    assert!(skipped.is_empty());
    assert_eq!(persisted, french);
}

#[tokio::test(start_paused = true)]
async fn test_restart_reuses_persisted_translations() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(temp_dir.path().join("store.json")));
    let history = Arc::new(RouteHistory::new());
    let first_model = Arc::new(BracketModel::new(Duration::from_millis(500)));
    let first = start(&store, first_model, &history).await;
    first.language().select_language(Language::from_code(LanguageCode::Ja)).await;
    first.theme().select_theme(ThemeId::Xmas).await;
    drop(first);

    let second_model = Arc::new(BracketModel::new(Duration::from_millis(500)));
    let second = start(&store, second_model.clone(), &history).await;

    assert_eq!(second.language().language().code, LanguageCode::Ja);
    assert_eq!(second.theme().theme(), ThemeId::Xmas);
    assert!(second.language().missing_keys(LanguageCode::Ja).is_empty());

    let outcome = second.language().select_language(Language::from_code(LanguageCode::Ja)).await;

    assert!(matches!(outcome, SelectionOutcome::AlreadyAvailable { .. }));
    assert_eq!(second_model.calls(), 0);
}

#[tokio::test]
async fn test_unparseable_response_leaves_cache_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(temp_dir.path().join("store.json")));
    let history = Arc::new(RouteHistory::new());
    let app = start(&store, Arc::new(ChattyModel), &history).await;
    let before = app.language().translations(LanguageCode::Ko);

    let outcome = app.language().select_language(Language::from_code(LanguageCode::Ko)).await;

    let SelectionOutcome::Failed { error, .. } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(matches!(error, TranslateError::InvalidResponse(_)));
    assert_eq!(app.language().translations(LanguageCode::Ko), before);
    assert_eq!(app.language().language().code, LanguageCode::Ko);
    assert_eq!(app.language().progress().current().map(|p| p.percent), Some(0));
    assert_eq!(history.last(), Some(Route::Home));
    assert_eq!(store.get(keys::LANGUAGE).await.unwrap().as_deref(), Some("ko"));
    assert_eq!(store.get(keys::TRANSLATIONS_CACHE).await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_remove_cache_then_restart_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(temp_dir.path().join("store.json")));
    let history = Arc::new(RouteHistory::new());
    let app = start(&store, Arc::new(BracketModel::new(Duration::from_millis(100))), &history).await;
    app.language().select_language(Language::from_code(LanguageCode::Es)).await;
    app.theme().select_theme(ThemeId::Dark).await;

    let message = app.remove_cache().await.unwrap();

    assert_eq!(message, format!("[{}]", default_dictionary(LanguageCode::En)[&TranslationKey::CacheRemoved]));
    for key in keys::ALL {
        assert_eq!(store.get(key).await.unwrap(), None, "{key}");
    }

    let restarted = start(&store, Arc::new(ChattyModel), &history).await;
    assert_eq!(restarted.language().language(), Language::ENGLISH);
    assert_eq!(restarted.theme().theme(), ThemeId::Light);
    assert_eq!(restarted.language().translations(LanguageCode::Es), default_dictionary(LanguageCode::Es));
}
