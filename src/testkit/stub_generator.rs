//! Scripted text generator standing in for the remote collaborator.

use crate::core::InsightError;
use crate::insights::TextGenerator;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(String),
    Fail(InsightError),
    Stall { delay: Duration, text: String },
}

/// In-memory [`TextGenerator`] with a fixed behaviour.
///
/// Clones share one call counter, so a test can keep a handle after moving
/// the stub into a strategy.
///
/// # Example
///
/// ```rust,ignore
/// let stub = StubTextGenerator::malformed();
/// let calls = stub.clone();
/// // ... run a weekly report ...
/// assert_eq!(calls.calls(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StubTextGenerator {
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl StubTextGenerator {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answers with `text`.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Respond(text.into()))
    }

    /// Answers with text that is not JSON.
    pub fn malformed() -> Self {
        Self::fixed("Sorry, I can't produce JSON right now.")
    }

    /// Always fails with `error`.
    pub fn failing(error: InsightError) -> Self {
        Self::with_behavior(Behavior::Fail(error))
    }

    /// Waits `delay` before answering, for exercising timeouts.
    pub fn slow(delay: Duration, text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Stall {
            delay,
            text: text.into(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Respond(text) => Ok(text.clone()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Stall { delay, text } => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}
