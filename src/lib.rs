//! mneme — a spaced repetition scheduling engine
//!
//! The scheduling core a note-taking or flashcard application embeds behind
//! its review UI:
//! - SM-2 style algorithm: minute-scale learning steps, then day-scale
//!   review intervals growing by a per-card ease factor
//! - Per-card state records the host persists however it likes
//! - Due-queue ordering, calendar aggregation and review statistics
//!
//! The crate does no I/O and never reads the clock; callers pass `now` into
//! every operation, which keeps scheduling deterministic and testable.

pub mod algorithm;
pub mod error;
pub mod models;
pub mod queue;
pub mod settings;

pub use algorithm::{
    apply_review, calculate_next_review, format_interval_days, format_interval_minutes,
    preview_intervals, preview_labels, ReviewResult,
};
pub use error::{Result, SchedulerError};
pub use models::{CardState, CardStatus, Rating, ReviewRecord, ReviewStats};
pub use queue::{due_queue, review_calendar, review_stats};
pub use settings::SchedulerSettings;
