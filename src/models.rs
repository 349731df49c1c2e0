//! Data models for the spaced repetition scheduler

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recall grade reported by the reviewer, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rating {
    /// Failed to recall
    Again,
    /// Recalled with serious difficulty
    Hard,
    /// Recalled correctly
    Good,
    /// Recalled effortlessly
    Easy,
}

impl Rating {
    /// Map the 1-4 rating scale used by review UIs (Again, Hard, Good, Easy)
    pub fn from_ui(rating: i32) -> Option<Rating> {
        match rating {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// Anything but `Again` counts as a successful recall
    pub fn is_correct(self) -> bool {
        self != Rating::Again
    }
}

/// Status of a card in the spaced repetition system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardStatus {
    /// Never reviewed
    New,
    /// Walking the minute-scale learning steps
    Learning,
    /// Regular day-scale spaced review
    Review,
    /// Failed a review and re-walking the learning steps
    Relearning,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl CardStatus {
    /// New, Learning and Relearning cards all sit on the learning ladder
    pub fn on_learning_steps(self) -> bool {
        matches!(self, Self::New | Self::Learning | Self::Relearning)
    }
}

/// Current spaced repetition state for a card
///
/// This is the record exchanged with the host application: the host creates
/// it, persists it under `item_id`, and hands it back with each rating. The
/// scheduler never mutates one in place; it produces a successor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Opaque identifier assigned by the host; never parsed here
    pub item_id: String,
    /// Current interval: minutes while on the learning steps, days in review
    #[serde(default)]
    pub interval: i32,
    /// Ease factor controlling review growth; 0.0 means not yet established
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Position on the learning-step ladder
    #[serde(default)]
    pub step_index: usize,
    /// When the card is due for review
    pub due_date: DateTime<Utc>,
    /// Total number of reviews
    #[serde(default)]
    pub review_count: i32,
    /// Number of correct responses
    #[serde(default)]
    pub correct_count: i32,
    /// Current status in the learning process
    #[serde(default)]
    pub status: CardStatus,
}

fn default_ease_factor() -> f64 {
    2.5
}

impl CardState {
    /// Fresh state for a card created at `now`
    pub fn new(item_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            interval: 0,
            ease_factor: default_ease_factor(),
            step_index: 0,
            due_date: now,
            review_count: 0,
            correct_count: 0,
            status: CardStatus::New,
        }
    }

    /// Check if the card is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_date
    }
}

/// A record of a single review attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: Uuid,
    pub item_id: String,
    /// Grade the reviewer gave
    pub rating: Rating,
    /// Interval at time of review (minutes or days, per the card's status)
    pub interval: i32,
    /// Ease factor at time of review
    pub ease_factor: f64,
    /// When the review occurred
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(
        item_id: impl Into<String>,
        rating: Rating,
        interval: i32,
        ease_factor: f64,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: item_id.into(),
            rating,
            interval,
            ease_factor,
            reviewed_at,
        }
    }
}

/// Statistics for a card collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub review_cards: usize,
    pub due_cards: usize,
    pub reviews_today: usize,
    pub correct_today: usize,
    pub streak_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_card_state_defaults() {
        let state = CardState::new("note.md#card-1", t0());
        assert_eq!(state.status, CardStatus::New);
        assert_eq!(state.interval, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.step_index, 0);
        assert_eq!(state.due_date, t0());
        assert!(state.is_due(t0()));
    }

    #[test]
    fn test_rating_from_ui() {
        assert_eq!(Rating::from_ui(1), Some(Rating::Again));
        assert_eq!(Rating::from_ui(2), Some(Rating::Hard));
        assert_eq!(Rating::from_ui(3), Some(Rating::Good));
        assert_eq!(Rating::from_ui(4), Some(Rating::Easy));
        assert_eq!(Rating::from_ui(0), None);
        assert_eq!(Rating::from_ui(5), None);
    }

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::Again < Rating::Hard);
        assert!(Rating::Hard < Rating::Good);
        assert!(Rating::Good < Rating::Easy);
        assert!(!Rating::Again.is_correct());
        assert!(Rating::Hard.is_correct());
    }

    #[test]
    fn test_card_state_deserializes_with_missing_fields() {
        // The host may persist a trimmed-down record; absent fields fall
        // back to the same values a fresh card gets.
        let json = r#"{"itemId":"abc","dueDate":"2026-03-01T12:00:00Z"}"#;
        let state: CardState = serde_json::from_str(json).unwrap();
        assert_eq!(state.item_id, "abc");
        assert_eq!(state.interval, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.step_index, 0);
        assert_eq!(state.status, CardStatus::New);
    }

    #[test]
    fn test_card_state_round_trip() {
        let mut state = CardState::new("abc", t0());
        state.status = CardStatus::Review;
        state.interval = 12;
        state.ease_factor = 2.65;
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"easeFactor\":2.65"));
        assert!(json.contains("\"status\":\"review\""));
        let back: CardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.interval, 12);
        assert_eq!(back.ease_factor, 2.65);
        assert_eq!(back.status, CardStatus::Review);
    }
}
