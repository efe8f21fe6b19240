// catalog/src/clock.rs

use chrono::{DateTime, Duration, Utc};

/// Source of the `updated_at` stamps written by the editor.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Returns `now`, pushed forward just past `previous` when the clock has not
/// moved (or went backwards) since the last write.
pub fn stamp_after(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
  match previous {
    Some(prev) if now <= prev => prev + Duration::microseconds(1),
    _ => now,
  }
}
