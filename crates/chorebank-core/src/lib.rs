//! chorebank-core
//!
//! Business logic for the points & rewards ledger.
//! Depends on chorebank-domain. No terminal I/O, no direct storage — every
//! service runs against an injected [`storage::LedgerStore`].

pub mod allowance_service;
pub mod banking_service;
pub mod error;
pub mod notify;
pub mod reconcile;
pub mod scoring;
pub mod storage;
pub mod submission_service;
pub mod time;

pub use allowance_service::*;
pub use banking_service::*;
pub use error::{CoreError, Result};
pub use notify::*;
pub use reconcile::*;
pub use scoring::ScoringEngine;
pub use storage::*;
pub use submission_service::*;
pub use time::{Clock, FixedClock, SystemClock};
