//! Remote translation of dictionary entries with progress reporting

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::time::{
    Instant,
    interval_at,
};

use crate::config::ProgressSettings;
use crate::language::Language;
use crate::model::{
    GenerativeModel,
    ModelError,
};
use crate::progress::{
    ProgressNotifier,
    ProgressStep,
    StepLabels,
    TranslationProgress,
};
use crate::translation::{
    Dictionary,
    TranslationKey,
    dictionary_from_json,
    dictionary_to_json,
};

/// Upper bound of the timer-driven ramp while the request is outstanding.
const RAMP_CEILING: u8 = 80;
/// First processing percentage.
const RAMP_START: u8 = 30;
/// Increase per ramp tick.
const RAMP_STEP: u8 = 10;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("No translation received")]
    NoResponse,

    #[error("Invalid JSON response: {0}")]
    InvalidResponse(String),

    #[error("Translation request failed: {0}")]
    RemoteService(#[from] ModelError),
}

impl TranslateError {
    /// UI string describing this error.
    #[must_use]
    pub const fn label_key(&self) -> TranslationKey {
        match self {
            Self::NoResponse => TranslationKey::NoTranslationReceived,
            Self::InvalidResponse(_) => TranslationKey::InvalidJsonResponse,
            Self::RemoteService(_) => TranslationKey::TranslationFailed,
        }
    }
}

/// Sends one translation request per call to a [`GenerativeModel`].
#[derive(Clone)]
pub struct TranslationRequester {
    /// Remote model
    model: Arc<dyn GenerativeModel>,
    /// Ramp interval and pacing delays
    pacing: ProgressSettings,
}

impl std::fmt::Debug for TranslationRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationRequester").field("pacing", &self.pacing).finish_non_exhaustive()
    }
}

impl TranslationRequester {
    #[must_use]
    pub const fn new(model: Arc<dyn GenerativeModel>, pacing: ProgressSettings) -> Self {
        Self { model, pacing }
    }

    /// Translates `source` (English texts) into `target`.
    ///
    /// Progress goes 10 → 25 → 30..80 → 85 → 95 → 100. On failure a 0%
    /// [`ProgressStep::Failed`] event is published before returning.
    ///
    /// # Errors
    /// - [`TranslateError::NoResponse`]: the model returned no text
    /// - [`TranslateError::InvalidResponse`]: no JSON object in the text
    /// - [`TranslateError::RemoteService`]: transport or service failure
    pub async fn translate(
        &self,
        target: Language,
        source: &Dictionary,
        labels: &StepLabels,
        notifier: &ProgressNotifier,
    ) -> Result<Dictionary, TranslateError> {
        let emit = |percent: u8, step: ProgressStep| {
            notifier.publish(TranslationProgress {
                language: target,
                percent,
                step,
                label: labels.label(step).to_string(),
            });
        };

        let result = self.run(target, source, &emit).await;

        match &result {
            Ok(translated) => {
                tracing::info!(
                    language = %target.code,
                    requested = source.len(),
                    received = translated.len(),
                    "Translation completed"
                );
            }
            Err(error) => {
                tracing::error!(language = %target.code, %error, "Translation failed");
                emit(0, ProgressStep::Failed);
            }
        }

        result
    }

    /// Request, ramp and parse, without the failure event.
    async fn run(
        &self,
        target: Language,
        source: &Dictionary,
        emit: &impl Fn(u8, ProgressStep),
    ) -> Result<Dictionary, TranslateError> {
        emit(10, ProgressStep::Connecting);
        pause(self.pacing.connect_delay()).await;

        let prompt = build_prompt(target, source);
        tracing::debug!(language = %target.code, keys = source.len(), "Requesting translation");
        let request = self.model.generate_content(&prompt);
        emit(25, ProgressStep::RequestSent);
        pause(self.pacing.request_delay()).await;

        let text = self.ramp_until_resolved(request, emit).await?;

        emit(85, ProgressStep::DataReceived);
        pause(self.pacing.receive_delay()).await;

        emit(95, ProgressStep::Parsing);
        pause(self.pacing.parse_delay()).await;
        let translated = parse_response(&text, source)?;

        emit(100, ProgressStep::Complete);
        Ok(translated)
    }

    /// Drives `request` to completion, raising progress by one step per ramp
    /// tick until [`RAMP_CEILING`]. The ticker is dropped with the request.
    async fn ramp_until_resolved<F>(
        &self,
        request: F,
        emit: &impl Fn(u8, ProgressStep),
    ) -> Result<String, ModelError>
    where
        F: Future<Output = Result<String, ModelError>>,
    {
        tokio::pin!(request);

        let period = self.pacing.ramp_interval().max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        let mut percent = RAMP_START;
        emit(percent, ProgressStep::Processing);

        loop {
            tokio::select! {
                biased;
                result = &mut request => return result,
                _ = ticker.tick(), if percent < RAMP_CEILING => {
                    percent = (percent + RAMP_STEP).min(RAMP_CEILING);
                    emit(percent, ProgressStep::Processing);
                }
            }
        }
    }
}

/// Sleeps unless `duration` is zero.
async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Prompt asking the model for a JSON object with the same keys as `source`.
#[must_use]
pub fn build_prompt(target: Language, source: &Dictionary) -> String {
    format!(
        "Translate the following English texts to {}. Return ONLY a JSON object with the same keys \
         and translated values. Keep emojis and special characters exactly as they are. Maintain \
         the same structure and formatting.\n\nEnglish texts to translate:\n{:#}\n\nReturn format: \
         {{\"key\": \"translated text\", ...}}",
        target.name,
        dictionary_to_json(source)
    )
}

/// Extracts the translated entries for the keys of `source` from raw model text.
///
/// # Errors
/// - [`TranslateError::NoResponse`]: `text` is blank
/// - [`TranslateError::InvalidResponse`]: no parseable JSON object
pub fn parse_response(text: &str, source: &Dictionary) -> Result<Dictionary, TranslateError> {
    if text.trim().is_empty() {
        return Err(TranslateError::NoResponse);
    }

    let json = extract_json_object(text)
        .ok_or_else(|| TranslateError::InvalidResponse("no JSON object found".to_string()))?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(TranslateError::InvalidResponse("not a JSON object".to_string()));
    };

    let (parsed, skipped) = dictionary_from_json(&object);
    if !skipped.is_empty() {
        tracing::debug!(?skipped, "Ignoring unknown entries in translation response");
    }

    Ok(parsed
        .into_iter()
        .filter(|(key, text)| {
            let requested = source.contains_key(key);
            if !requested {
                tracing::debug!(%key, "Ignoring key that was not requested");
            }
            requested && !text.trim().is_empty()
        })
        .collect())
}

/// First balanced `{…}` substring of `text` that parses as JSON.
///
/// Braces inside string literals are ignored. When a candidate does not
/// parse, the search resumes at the next `{`.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = text.get(search_from..).and_then(|rest| rest.find('{')) {
        let start = search_from + offset;
        if let Some(end) = balanced_end(text, start) {
            let candidate = text.get(start..end)?;
            if serde_json::from_str::<Value>(candidate).is_ok() {
                return Some(candidate);
            }
        }
        search_from = start + 1;
    }

    None
}

/// Byte index just past the brace closing the one at `start`.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.get(start..)?.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + index + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}
