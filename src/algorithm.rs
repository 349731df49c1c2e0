//! SM-2 style scheduling with learning steps
//!
//! A card walks a ladder of short minute-scale steps (default 1m, then 10m),
//! graduates into day-scale review, and from then on grows its interval
//! exponentially by its ease factor. Failing a review drops the card back
//! onto the ladder at minute scale without resetting its ease.
//!
//! The whole module is pure: `now` is always passed in, nothing here reads
//! the clock, and the input state is never touched.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, SchedulerError};
use crate::models::{CardState, CardStatus, Rating, ReviewRecord};
use crate::settings::SchedulerSettings;

/// Ease penalty for failing a review
const LAPSE_EASE_PENALTY: f64 = 0.20;

/// Ease penalty for a Hard review
const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease reward for an Easy review
const EASY_EASE_REWARD: f64 = 0.15;

/// Result of calculating the next review
///
/// Carries exactly the fields a review mutates; `apply_review` folds one
/// into a successor `CardState`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub status: CardStatus,
    /// Minutes while on the learning steps, days once in review
    pub interval: i32,
    pub ease_factor: f64,
    pub step_index: usize,
    pub due_date: DateTime<Utc>,
}

impl ReviewResult {
    /// Compact label for how far out this result schedules the card
    pub fn due_in_label(&self, now: DateTime<Utc>) -> String {
        let minutes = (self.due_date - now).num_minutes();
        if minutes < 60 * 24 {
            format_interval_minutes(minutes as i32)
        } else {
            format_interval_days((minutes / (60 * 24)) as i32)
        }
    }
}

/// Calculate the next review state for a card
///
/// `now` is the instant the rating was given. The returned result is the
/// complete successor scheduling state; the input is left as-is.
///
/// # Errors
/// Rejects records that violate the scheduling invariants (step index off
/// the ladder, negative interval, unusable ease factor) and settings that
/// fail [`SchedulerSettings::validate`], rather than computing a nonsense
/// schedule from them.
pub fn calculate_next_review(
    state: &CardState,
    rating: Rating,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> Result<ReviewResult> {
    validate(state, settings)?;

    match state.status {
        CardStatus::New | CardStatus::Learning | CardStatus::Relearning => {
            Ok(next_learning_step(state, rating, now, settings))
        }
        CardStatus::Review => Ok(next_review(state, rating, now, settings)),
    }
}

/// Submit a review: fold the calculated result into a successor state
///
/// Returns the new state plus the log entry for this review. The caller
/// decides whether and where to persist either.
pub fn apply_review(
    state: &CardState,
    rating: Rating,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> Result<(CardState, ReviewRecord)> {
    let next = calculate_next_review(state, rating, now, settings)?;
    let record = ReviewRecord::new(
        state.item_id.clone(),
        rating,
        state.interval,
        state.ease_factor,
        now,
    );

    let mut updated = state.clone();
    updated.status = next.status;
    updated.interval = next.interval;
    updated.ease_factor = next.ease_factor;
    updated.step_index = next.step_index;
    updated.due_date = next.due_date;
    updated.review_count += 1;
    if rating.is_correct() {
        updated.correct_count += 1;
    }

    Ok((updated, record))
}

/// What each of the four grades would do, for rating-button labels
///
/// Index order matches the UI scale: Again, Hard, Good, Easy.
pub fn preview_intervals(
    state: &CardState,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> Result<[ReviewResult; 4]> {
    Ok([
        calculate_next_review(state, Rating::Again, now, settings)?,
        calculate_next_review(state, Rating::Hard, now, settings)?,
        calculate_next_review(state, Rating::Good, now, settings)?,
        calculate_next_review(state, Rating::Easy, now, settings)?,
    ])
}

/// Formatted due-in labels for the four rating buttons
pub fn preview_labels(
    state: &CardState,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> Result<[String; 4]> {
    let previews = preview_intervals(state, now, settings)?;
    Ok(previews.map(|result| result.due_in_label(now)))
}

fn validate(state: &CardState, settings: &SchedulerSettings) -> Result<()> {
    settings.validate()?;
    if state.interval < 0 {
        return Err(SchedulerError::NegativeInterval(state.interval));
    }
    if !state.ease_factor.is_finite() || state.ease_factor < 0.0 {
        return Err(SchedulerError::InvalidEaseFactor(state.ease_factor));
    }
    if state.status.on_learning_steps() && state.step_index >= settings.learning_steps.len() {
        return Err(SchedulerError::StepOutOfRange {
            index: state.step_index,
            steps: settings.learning_steps.len(),
        });
    }
    // A reviewing card had its ease established at graduation
    if state.status == CardStatus::Review && state.ease_factor == 0.0 {
        return Err(SchedulerError::InvalidEaseFactor(state.ease_factor));
    }
    Ok(())
}

/// Shared ladder transition for New, Learning and Relearning cards
///
/// A relearning card goes through here unchanged: its ease was already
/// adjusted at the moment of the lapse, so the graduation fallback to
/// `starting_ease` never fires for it.
fn next_learning_step(
    state: &CardState,
    rating: Rating,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> ReviewResult {
    let steps = &settings.learning_steps;

    match rating {
        // Back to the bottom of the ladder; the status itself is kept
        Rating::Again => ReviewResult {
            status: state.status,
            interval: steps[0] as i32,
            ease_factor: state.ease_factor,
            step_index: 0,
            due_date: due_in_minutes(now, steps[0]),
        },
        // Repeat the current step
        Rating::Hard => ReviewResult {
            status: state.status,
            interval: steps[state.step_index] as i32,
            ease_factor: state.ease_factor,
            step_index: state.step_index,
            due_date: due_in_minutes(now, steps[state.step_index]),
        },
        Rating::Good => {
            if state.step_index + 1 < steps.len() {
                let next = state.step_index + 1;
                ReviewResult {
                    status: CardStatus::Learning,
                    interval: steps[next] as i32,
                    ease_factor: state.ease_factor,
                    step_index: next,
                    due_date: due_in_minutes(now, steps[next]),
                }
            } else {
                graduate(state, settings.graduating_interval, now, settings)
            }
        }
        // Easy skips the rest of the ladder from any step
        Rating::Easy => graduate(state, settings.easy_interval, now, settings),
    }
}

/// Move a card off the ladder into day-scale review
fn graduate(
    state: &CardState,
    interval_days: i32,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> ReviewResult {
    let ease_factor = if state.ease_factor > 0.0 {
        state.ease_factor
    } else {
        settings.starting_ease
    };
    ReviewResult {
        status: CardStatus::Review,
        interval: interval_days,
        ease_factor,
        step_index: state.step_index,
        due_date: due_in_days(now, interval_days),
    }
}

/// Day-scale transition for reviewing cards
fn next_review(
    state: &CardState,
    rating: Rating,
    now: DateTime<Utc>,
    settings: &SchedulerSettings,
) -> ReviewResult {
    match rating {
        // Lapse: drop back to minute-scale relearning.
        // TODO: decide whether a lapse should reset `interval`; today the
        // day count survives relearning untouched and re-graduation
        // ignores it.
        Rating::Again => ReviewResult {
            status: CardStatus::Relearning,
            interval: state.interval,
            ease_factor: floor_ease(state.ease_factor - LAPSE_EASE_PENALTY, settings),
            step_index: 0,
            due_date: due_in_minutes(now, settings.learning_steps[0]),
        },
        Rating::Hard => {
            let interval = grow(state.interval, settings.hard_interval_multiplier);
            ReviewResult {
                status: CardStatus::Review,
                interval,
                ease_factor: floor_ease(state.ease_factor - HARD_EASE_PENALTY, settings),
                step_index: state.step_index,
                due_date: due_in_days(now, interval),
            }
        }
        Rating::Good => {
            let interval = grow(state.interval, state.ease_factor);
            ReviewResult {
                status: CardStatus::Review,
                interval,
                ease_factor: state.ease_factor,
                step_index: state.step_index,
                due_date: due_in_days(now, interval),
            }
        }
        Rating::Easy => {
            let interval = grow(state.interval, state.ease_factor * settings.easy_bonus);
            ReviewResult {
                status: CardStatus::Review,
                interval,
                // Rewarded ease has no upper cap
                ease_factor: state.ease_factor + EASY_EASE_REWARD,
                step_index: state.step_index,
                due_date: due_in_days(now, interval),
            }
        }
    }
}

/// Intervals stay whole days; growth truncates rather than rounds
fn grow(interval: i32, factor: f64) -> i32 {
    (f64::from(interval) * factor).floor() as i32
}

fn floor_ease(ease_factor: f64, settings: &SchedulerSettings) -> f64 {
    ease_factor.max(settings.min_ease)
}

fn due_in_minutes(now: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    now + Duration::minutes(i64::from(minutes))
}

fn due_in_days(now: DateTime<Utc>, days: i32) -> DateTime<Utc> {
    now + Duration::days(i64::from(days))
}

/// Format a day-scale interval to a human-readable string
pub fn format_interval_days(days: i32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days == 1 {
        "1d".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        let weeks = days / 7;
        if weeks == 1 {
            "1w".to_string()
        } else {
            format!("{}w", weeks)
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1mo".to_string()
        } else {
            format!("{}mo", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1y".to_string()
        } else {
            format!("{}y", years)
        }
    }
}

/// Format a minute-scale interval to a human-readable string
pub fn format_interval_minutes(minutes: i32) -> String {
    if minutes == 0 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}h{}m", minutes / 60, minutes % 60)
    }
}
