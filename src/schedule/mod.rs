//! Round scheduling primitives.
//!
//! The engine never blocks. Every delay (pre-round pause, playback steps,
//! post-pick lockout) is a timer on a [`Timeline`] that the host drives
//! forward. Each timer carries the [`RoundToken`] it was scheduled for, and
//! the engine ignores timers whose token is no longer live.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use simon_engine::schedule::{RoundToken, Timeline};
//!
//! let mut timeline = Timeline::new();
//! let token = RoundToken::new(1, 0);
//!
//! for index in 0..3u64 {
//!     timeline.schedule_at(Duration::from_millis(500 * index), token, index);
//! }
//!
//! let mut fired = Vec::new();
//! while let Some(timer) = timeline.pop_due(Duration::from_millis(1000)) {
//!     fired.push(timer.event);
//! }
//! assert_eq!(fired, vec![0, 1, 2]);
//! ```

mod timeline;

pub use timeline::{RoundToken, Timeline, Timer, TimerId};
