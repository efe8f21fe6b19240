// catalog/src/prompt.rs

//! Blocking user interaction points used by the browser and editor.

/// Confirmation and failure notification surface.
///
/// Both calls block until the user has answered or acknowledged.
pub trait UserPrompt: Send + Sync {
  /// Asks a yes/no question. `false` aborts the pending action.
  fn confirm(&self, message: &str) -> bool;

  /// Tells the user an action failed. One generic message per action.
  fn notify_failure(&self, message: &str);
}

/// Answers every confirmation with a fixed value and logs failure notices.
/// Useful for scripted runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
  pub answer: bool,
}

impl AutoPrompt {
  pub fn accept() -> Self {
    Self { answer: true }
  }

  pub fn decline() -> Self {
    Self { answer: false }
  }
}

impl UserPrompt for AutoPrompt {
  fn confirm(&self, message: &str) -> bool {
    tracing::debug!(answer = self.answer, "auto-answering confirmation: {}", message);
    self.answer
  }

  fn notify_failure(&self, message: &str) {
    tracing::warn!("{}", message);
  }
}
