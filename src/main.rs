//! Command-line shell for the lazy UI translator.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use lazy_ui_translator::app::App;
use lazy_ui_translator::config::{
    ConfigError,
    ConfigManager,
};
use lazy_ui_translator::language::{
    Language,
    LanguageCode,
    UnknownLanguageCode,
};
use lazy_ui_translator::logging;
use lazy_ui_translator::model::{
    GeminiClient,
    GenerativeModel,
    ModelError,
    OfflineModel,
};
use lazy_ui_translator::navigation::TracingNavigator;
use lazy_ui_translator::progress::TranslationProgress;
use lazy_ui_translator::provider::SelectionOutcome;
use lazy_ui_translator::store::{
    FileStore,
    StoreError,
};
use lazy_ui_translator::theme::{
    ThemeId,
    UnknownThemeId,
};
use lazy_ui_translator::translation::{
    TranslationKey,
    UnknownTranslationKey,
};
use thiserror::Error;

/// Usage text
const HELP: &str = "\
lazy-ui-translator

USAGE:
  lazy-ui-translator [--workspace <dir>] <command>

COMMANDS:
  languages              List languages and how many keys each is missing
  get <key> [--lang <code>]
                         Print one UI string
  select <code>          Switch language, translating missing strings
  theme [<id>]           Show or switch the theme
  remove-cache           Forget language, theme and translations
";

/// Failures reported to the user
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Args(#[from] pico_args::Error),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Language(#[from] UnknownLanguageCode),

    #[error(transparent)]
    Theme(#[from] UnknownThemeId),

    #[error(transparent)]
    Key(#[from] UnknownTranslationKey),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments and runs one command.
async fn run() -> Result<(), CliError> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let workspace = match args.opt_value_from_str::<_, PathBuf>("--workspace")? {
        Some(path) => path,
        None => std::env::current_dir().map_err(ConfigError::from)?,
    };
    let lang: Option<LanguageCode> = args.opt_value_from_str("--lang")?;
    let command: Option<String> = args.subcommand()?;
    let rest: Vec<String> =
        args.finish().into_iter().filter_map(|arg| arg.into_string().ok()).collect();

    let mut config = ConfigManager::new();
    config.load_settings(Some(workspace))?;
    let settings = config.get_settings().clone();
    let _log_guard = logging::init(&settings.log);

    let store = Arc::new(FileStore::new(config.storage_path()));
    let model: Arc<dyn GenerativeModel> = match settings.model.resolve_api_key() {
        Ok(key) => Arc::new(GeminiClient::new(&settings.model, key)?),
        Err(error) => {
            tracing::warn!(%error, "Translations are unavailable");
            Arc::new(OfflineModel::new(error.to_string()))
        }
    };
    let app = App::start(store, model, Arc::new(TracingNavigator), &settings).await;

    match (command.as_deref(), rest.as_slice()) {
        (Some("languages"), []) => list_languages(&app),
        (Some("get"), [key]) => {
            let key: TranslationKey = key.parse()?;
            println!("{}", app.language().get_string(key, lang));
        }
        (Some("select"), [code]) => select(&app, code.parse()?).await,
        (Some("theme"), []) => println!("{}", app.theme().theme()),
        (Some("theme"), [id]) => {
            let theme: ThemeId = id.parse()?;
            app.theme().select_theme(theme).await;
            println!("{}", app.language().get_string(theme.label_key(), None));
        }
        (Some("remove-cache"), []) => println!("{}", app.remove_cache().await?),
        _ => return Err(CliError::Usage(HELP.to_string())),
    }

    Ok(())
}

/// Prints every language with its cache coverage.
fn list_languages(app: &App) {
    let provider = app.language();
    let active = provider.language();
    for language in provider.languages() {
        let marker = if *language == active { "*" } else { " " };
        println!(
            "{marker} {code}  {native:<12} {label:<16} missing {missing}",
            code = language.code,
            native = language.native_name,
            label = provider.get_string(language.label_key(), None),
            missing = provider.missing_keys(language.code).len(),
        );
    }
}

/// Switches language while printing progress as it arrives.
async fn select(app: &App, code: LanguageCode) {
    let provider = app.language();
    let mut subscription = provider.progress().subscribe();
    let selection = provider.select_language(Language::from_code(code));
    tokio::pin!(selection);

    let outcome = loop {
        tokio::select! {
            outcome = &mut selection => break outcome,
            Some(progress) = subscription.recv() => print_progress(&progress),
        }
    };
    while let Some(progress) = subscription.try_recv() {
        print_progress(&progress);
    }

    match outcome {
        SelectionOutcome::AlreadyAvailable { language } => {
            println!("{}", provider.get_string(language.label_key(), Some(code)));
        }
        SelectionOutcome::Translated { keys, .. } => {
            println!("{} ({})", provider.get_string(TranslationKey::TranslationComplete, Some(code)), keys.len());
        }
        SelectionOutcome::Failed { error, .. } => {
            eprintln!("{}: {error}", provider.get_string(error.label_key(), Some(code)));
        }
    }
}

/// One progress line
fn print_progress(progress: &TranslationProgress) {
    println!("[{:>3}%] {}", progress.percent, progress.label);
}
