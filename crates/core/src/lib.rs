//! Domain core for the dog photo assignment app.
//!
//! Everything here is pure, synchronous logic with no HTTP dependency:
//!
//! - [`PhotoRecord`] -- immutable description of one photo.
//! - [`AssignmentLedger`] -- email → photos mapping with observers and
//!   persistence.
//! - [`DisableAggregator`] -- tracks the reasons a control is disabled.
//! - [`email`] -- best-effort structural email checks with readable warnings.
//! - [`store`] -- string key-value storage used to persist the ledger.

pub mod disable;
pub mod email;
pub mod error;
pub mod ledger;
pub mod photo;
pub mod store;

pub use disable::{DisableAggregator, Disableable, Toggle};
pub use email::EmailWarnings;
pub use error::CoreError;
pub use ledger::{AssignmentLedger, ObserverId};
pub use photo::PhotoRecord;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
