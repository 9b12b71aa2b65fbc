//! Chore definitions and their week-bucketed assignments.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{week_start_for, Displayable, Identifiable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chore {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    /// Base reward in points; the primary currency for awards.
    pub points: Decimal,
    /// Required chores carry an automatic full penalty when denied unscored.
    pub is_required: bool,
    pub frequency: ChoreFrequency,
    pub priority: ChorePriority,
}

impl Chore {
    pub fn new(family_id: Uuid, name: impl Into<String>, points: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            name: name.into(),
            points,
            is_required: false,
            frequency: ChoreFrequency::Weekly,
            priority: ChorePriority::Medium,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_frequency(mut self, frequency: ChoreFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_priority(mut self, priority: ChorePriority) -> Self {
        self.priority = priority;
        self
    }
}

impl Identifiable for Chore {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Chore {
    fn display_label(&self) -> String {
        format!("{} [{} pts]", self.name, self.points)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// How often a chore recurs within a week.
pub enum ChoreFrequency {
    /// Occurs on each listed weekday.
    Daily { scheduled_days: Vec<Weekday> },
    /// One occurrence per week.
    Weekly,
}

impl ChoreFrequency {
    /// Number of occurrences this chore contributes to one week.
    pub fn weekly_occurrences(&self) -> u32 {
        match self {
            ChoreFrequency::Daily { scheduled_days } => scheduled_days.len() as u32,
            ChoreFrequency::Weekly => 1,
        }
    }
}

impl fmt::Display for ChoreFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoreFrequency::Daily { scheduled_days } => {
                write!(f, "Daily ({} days/week)", scheduled_days.len())
            }
            ChoreFrequency::Weekly => f.write_str("Weekly"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Relative weight used by the allowance budget calculator.
pub enum ChorePriority {
    Low,
    Medium,
    High,
}

impl ChorePriority {
    /// Budget multiplier applied to the per-instance base value.
    pub fn multiplier(self) -> Decimal {
        match self {
            ChorePriority::Low => Decimal::new(75, 2),
            ChorePriority::Medium => Decimal::ONE,
            ChorePriority::High => Decimal::new(15, 1),
        }
    }
}

impl fmt::Display for ChorePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChorePriority::Low => "Low",
            ChorePriority::Medium => "Medium",
            ChorePriority::High => "High",
        };
        f.write_str(label)
    }
}

/// Binds a chore to a user for one recurrence week.
///
/// Unique per (chore, user, week_start); `week_start` is always normalized to
/// the Monday of the supplied date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoreAssignment {
    pub id: Uuid,
    pub chore_id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
}

impl ChoreAssignment {
    pub fn new(chore_id: Uuid, user_id: Uuid, week: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            chore_id,
            user_id,
            week_start: week_start_for(week),
        }
    }

    /// True when the calendar day falls inside this assignment's week.
    pub fn covers(&self, day: NaiveDate) -> bool {
        week_start_for(day) == self.week_start
    }
}

impl Identifiable for ChoreAssignment {
    fn id(&self) -> Uuid {
        self.id
    }
}
