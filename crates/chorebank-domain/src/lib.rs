//! chorebank-domain
//!
//! Data model for the family points & rewards ledger.
//! No services, no storage, no I/O — plain data plus the invariant-preserving
//! helpers that belong to the types themselves.

pub mod balance;
pub mod banking;
pub mod chore;
pub mod common;
pub mod family;
pub mod score;
pub mod submission;

pub use balance::{BalanceDelta, PointBalance};
pub use banking::{PointTransaction, PointTransactionKind, PointTransactionStatus};
pub use chore::{Chore, ChoreAssignment, ChoreFrequency, ChorePriority};
pub use common::{week_start_for, Displayable, Identifiable, Principal, Role};
pub use family::{Family, FamilyMember};
pub use score::{QualityScore, ScoreRangeError};
pub use submission::{ChoreApproval, ChoreSubmission, SubmissionStatus};
