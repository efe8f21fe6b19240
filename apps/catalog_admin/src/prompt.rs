// apps/catalog_admin/src/prompt.rs

use catalog::UserPrompt;
use std::io::{self, BufRead, Write};

/// Asks on stdout and reads the answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl UserPrompt for ConsolePrompt {
  fn confirm(&self, message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
      return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
      Ok(_) => is_yes(&answer),
      Err(e) => {
        tracing::warn!(error = %e, "Could not read confirmation; treating as 'no'.");
        false
      }
    }
  }

  fn notify_failure(&self, message: &str) {
    eprintln!("!! {}", message);
  }
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
