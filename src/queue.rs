//! Due-queue ordering and calendar aggregation
//!
//! Pure views over in-memory card state; loading and persisting the records
//! is the host application's job. The host also supplies its display time
//! zone, the same way the clock is supplied to the scheduler.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{CardState, CardStatus, ReviewRecord, ReviewStats};

/// Cards due at `now`, oldest first
///
/// Ties are broken by item id so the ordering is stable across reloads.
pub fn due_queue<'a>(states: &'a [CardState], now: DateTime<Utc>) -> Vec<&'a CardState> {
    let mut due: Vec<&CardState> = states.iter().filter(|s| s.is_due(now)).collect();
    due.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    log::debug!("{} of {} cards due", due.len(), states.len());
    due
}

/// Count of cards due per calendar day, for calendar rendering
///
/// Days are taken in the supplied time zone and come out sorted.
pub fn review_calendar<Tz: TimeZone>(
    states: &[CardState],
    tz: &Tz,
) -> BTreeMap<NaiveDate, usize> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for state in states {
        let day = state.due_date.with_timezone(tz).date_naive();
        *days.entry(day).or_insert(0) += 1;
    }
    days
}

/// Review statistics across a card collection
///
/// `reviews` is the host's review log; it drives the daily counters and the
/// streak, while the card states drive the status and due counts.
pub fn review_stats<Tz: TimeZone>(
    states: &[CardState],
    reviews: &[ReviewRecord],
    now: DateTime<Utc>,
    tz: &Tz,
) -> ReviewStats {
    let mut stats = ReviewStats {
        total_cards: states.len(),
        ..Default::default()
    };

    for state in states {
        match state.status {
            CardStatus::New => stats.new_cards += 1,
            CardStatus::Learning => stats.learning_cards += 1,
            CardStatus::Review | CardStatus::Relearning => stats.review_cards += 1,
        }
        if state.is_due(now) {
            stats.due_cards += 1;
        }
    }

    let today = now.with_timezone(tz).date_naive();
    let mut review_days: BTreeSet<NaiveDate> = BTreeSet::new();
    for review in reviews {
        let day = review.reviewed_at.with_timezone(tz).date_naive();
        review_days.insert(day);
        if day == today {
            stats.reviews_today += 1;
            if review.rating.is_correct() {
                stats.correct_today += 1;
            }
        }
    }
    stats.streak_days = streak_days(&review_days, today);

    stats
}

/// Consecutive days with at least one review, counting back from today
///
/// A streak survives today having no reviews yet, as long as yesterday had
/// some.
fn streak_days(review_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> i32 {
    let mut day = today;
    if !review_days.contains(&day) {
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => return 0,
        }
    }

    let mut streak = 0;
    while review_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
