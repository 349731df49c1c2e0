//! Scheduler configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Tunables for the scheduling algorithm
///
/// Every field has the conventional default, so a partially specified
/// settings object from the host deserializes cleanly. A settings value is
/// read-only for the duration of a scheduling call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerSettings {
    /// Learning-step ladder, in minutes
    #[serde(default = "default_learning_steps")]
    pub learning_steps: Vec<u32>,
    /// Days granted when graduating off the last step via Good
    #[serde(default = "default_graduating_interval")]
    pub graduating_interval: i32,
    /// Days granted when graduating via Easy
    #[serde(default = "default_easy_interval")]
    pub easy_interval: i32,
    /// Ease assigned to a card graduating without an established ease
    #[serde(default = "default_starting_ease")]
    pub starting_ease: f64,
    /// Floor applied whenever the ease factor is decreased
    #[serde(default = "default_min_ease")]
    pub min_ease: f64,
    /// Extra multiplier on Easy review growth
    #[serde(default = "default_easy_bonus")]
    pub easy_bonus: f64,
    /// Multiplier on Hard review growth
    #[serde(default = "default_hard_interval_multiplier")]
    pub hard_interval_multiplier: f64,
}

fn default_learning_steps() -> Vec<u32> {
    vec![1, 10]
}

fn default_graduating_interval() -> i32 {
    1
}

fn default_easy_interval() -> i32 {
    4
}

fn default_starting_ease() -> f64 {
    2.5
}

fn default_min_ease() -> f64 {
    1.3
}

fn default_easy_bonus() -> f64 {
    1.3
}

fn default_hard_interval_multiplier() -> f64 {
    1.2
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            learning_steps: default_learning_steps(),
            graduating_interval: default_graduating_interval(),
            easy_interval: default_easy_interval(),
            starting_ease: default_starting_ease(),
            min_ease: default_min_ease(),
            easy_bonus: default_easy_bonus(),
            hard_interval_multiplier: default_hard_interval_multiplier(),
        }
    }
}

impl SchedulerSettings {
    /// Reject settings the interval math cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.learning_steps.is_empty() {
            return Err(SchedulerError::EmptyLearningSteps);
        }
        if self.graduating_interval < 0 {
            return Err(SchedulerError::NegativeInterval(self.graduating_interval));
        }
        if self.easy_interval < 0 {
            return Err(SchedulerError::NegativeInterval(self.easy_interval));
        }
        if !self.starting_ease.is_finite() || self.starting_ease <= 0.0 {
            return Err(SchedulerError::InvalidEaseFactor(self.starting_ease));
        }
        if !self.min_ease.is_finite() || self.min_ease <= 0.0 {
            return Err(SchedulerError::InvalidEaseFactor(self.min_ease));
        }
        if !self.easy_bonus.is_finite() || self.easy_bonus < 1.0 {
            return Err(SchedulerError::MultiplierTooSmall(self.easy_bonus));
        }
        if !self.hard_interval_multiplier.is_finite() || self.hard_interval_multiplier < 1.0 {
            return Err(SchedulerError::MultiplierTooSmall(
                self.hard_interval_multiplier,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SchedulerSettings::default();
        assert_eq!(settings.learning_steps, vec![1, 10]);
        assert_eq!(settings.graduating_interval, 1);
        assert_eq!(settings.easy_interval, 4);
        assert_eq!(settings.starting_ease, 2.5);
        assert_eq!(settings.min_ease, 1.3);
        assert_eq!(settings.easy_bonus, 1.3);
        assert_eq!(settings.hard_interval_multiplier, 1.2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings: SchedulerSettings =
            serde_json::from_str(r#"{"learningSteps":[2,15,60],"easyBonus":1.5}"#).unwrap();
        assert_eq!(settings.learning_steps, vec![2, 15, 60]);
        assert_eq!(settings.easy_bonus, 1.5);
        assert_eq!(settings.graduating_interval, 1);
        assert_eq!(settings.min_ease, 1.3);
    }

    #[test]
    fn test_validate_rejects_empty_ladder() {
        let settings = SchedulerSettings {
            learning_steps: Vec::new(),
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SchedulerError::EmptyLearningSteps));
    }

    #[test]
    fn test_validate_rejects_shrinking_multiplier() {
        let settings = SchedulerSettings {
            hard_interval_multiplier: 0.8,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SchedulerError::MultiplierTooSmall(0.8))
        );
    }

    #[test]
    fn test_validate_rejects_nonpositive_ease() {
        let settings = SchedulerSettings {
            min_ease: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SchedulerError::InvalidEaseFactor(0.0)));
    }
}
