//! Shared traits, identity types, and week-bucketing helpers.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Family membership role as supplied by the identity provider.
pub enum Role {
    Parent,
    Child,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Parent => "Parent",
            Role::Child => "Child",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// The authenticated actor behind a ledger operation.
///
/// Supplied by the external identity provider and trusted as-is; the ledger
/// only enforces role and family scoping on top of it.
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub family_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid, role: Role, family_id: Uuid) -> Self {
        Self {
            user_id,
            role,
            family_id,
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self.role, Role::Parent)
    }

    pub fn is_child(&self) -> bool {
        matches!(self.role, Role::Child)
    }
}

/// Normalizes a date to the Monday that anchors its recurrence week.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
