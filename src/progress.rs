//! Translation progress publishing

use tokio::sync::{
    broadcast,
    watch,
};

use crate::language::Language;
use crate::translation::TranslationKey;

/// Named phase of an in-flight translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStep {
    Connecting,
    RequestSent,
    Processing,
    DataReceived,
    Parsing,
    Complete,
    Failed,
}

impl ProgressStep {
    pub const ALL: [Self; 7] = [
        Self::Connecting,
        Self::RequestSent,
        Self::Processing,
        Self::DataReceived,
        Self::Parsing,
        Self::Complete,
        Self::Failed,
    ];

    #[must_use]
    pub const fn label_key(self) -> TranslationKey {
        match self {
            Self::Connecting => TranslationKey::Connecting,
            Self::RequestSent => TranslationKey::SendingTranslationRequest,
            Self::Processing => TranslationKey::ProcessingTranslation,
            Self::DataReceived => TranslationKey::ReceivingTranslationData,
            Self::Parsing => TranslationKey::ParsingTranslationResults,
            Self::Complete => TranslationKey::TranslationComplete,
            Self::Failed => TranslationKey::TranslationFailed,
        }
    }

    /// Position in [`Self::ALL`].
    const fn index(self) -> usize {
        match self {
            Self::Connecting => 0,
            Self::RequestSent => 1,
            Self::Processing => 2,
            Self::DataReceived => 3,
            Self::Parsing => 4,
            Self::Complete => 5,
            Self::Failed => 6,
        }
    }
}

/// One progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationProgress {
    pub language: Language,
    /// 0–100
    pub percent: u8,
    pub step: ProgressStep,
    /// Step label in the target language
    pub label: String,
}

/// Step labels resolved once per translation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLabels {
    /// Indexed like [`ProgressStep::ALL`]
    labels: [String; 7],
}

impl StepLabels {
    /// Resolves each step's label with `lookup`.
    #[must_use]
    pub fn resolve(mut lookup: impl FnMut(TranslationKey) -> String) -> Self {
        Self { labels: ProgressStep::ALL.map(|step| lookup(step.label_key())) }
    }

    #[must_use]
    pub fn label(&self, step: ProgressStep) -> &str {
        self.labels.get(step.index()).map_or("", String::as_str)
    }
}

impl Default for StepLabels {
    /// Wire names of the label keys.
    fn default() -> Self {
        Self::resolve(|key| key.as_str().to_string())
    }
}

/// Publishes [`TranslationProgress`] to the presentation layer.
///
/// The latest value is kept in a `watch` channel for late observers; every
/// event is also fanned out to [`ProgressSubscription`]s.
#[derive(Debug)]
pub struct ProgressNotifier {
    /// Latest value
    latest: watch::Sender<Option<TranslationProgress>>,
    /// Fan-out of every event
    events: broadcast::Sender<TranslationProgress>,
}

impl ProgressNotifier {
    /// `capacity` is the per-subscriber buffer; lagging subscribers skip ahead.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (latest, _) = watch::channel(None);
        let (events, _) = broadcast::channel(capacity.max(1));
        Self { latest, events }
    }

    pub fn publish(&self, progress: TranslationProgress) {
        tracing::debug!(
            language = %progress.language.code,
            percent = progress.percent,
            step = ?progress.step,
            "Translation progress"
        );
        self.latest.send_replace(Some(progress.clone()));
        if self.events.send(progress).is_err() {
            tracing::trace!("No progress subscribers");
        }
    }

    /// Most recently published value.
    #[must_use]
    pub fn current(&self) -> Option<TranslationProgress> {
        self.latest.borrow().clone()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<TranslationProgress>> {
        self.latest.subscribe()
    }

    /// Events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> ProgressSubscription {
        ProgressSubscription { receiver: self.events.subscribe() }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub fn clear(&self) {
        self.latest.send_replace(None);
    }
}

impl Default for ProgressNotifier {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Handle returned by [`ProgressNotifier::subscribe`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ProgressSubscription {
    /// Broadcast receiver
    receiver: broadcast::Receiver<TranslationProgress>,
}

impl ProgressSubscription {
    /// Next event, or `None` once the notifier is gone.
    pub async fn recv(&mut self) -> Option<TranslationProgress> {
        loop {
            match self.receiver.recv().await {
                Ok(progress) => return Some(progress),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Progress subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<TranslationProgress> {
        loop {
            match self.receiver.try_recv() {
                Ok(progress) => return Some(progress),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Progress subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}
