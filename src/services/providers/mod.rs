/// Text-generation provider abstraction
///
/// Preference parsing and explanation writing both go through a
/// `TextGenerator`, so the concrete service can be swapped (or faked in
/// tests) without touching either caller.
use crate::error::AppResult;

pub mod friendli;

pub use friendli::FriendliClient;

/// A single system + user exchange sent to a chat model
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
        }
    }
}

/// Trait for text-generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the prompt and returns the model's reply, trimmed
    ///
    /// Transport failures, timeouts and non-success statuses are errors;
    /// callers decide whether to degrade or surface them.
    async fn generate(&self, prompt: &ChatPrompt) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
