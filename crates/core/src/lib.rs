//! # Sakhi Core
//!
//! Pure domain computations for the Sakhi maternal and child health record
//! system:
//! - Record shapes shared by every surface (`records`)
//! - Age, delivery-date and elapsed-time arithmetic (`temporal`)
//! - BMI, risk-score and immunisation-schedule derivations (`clinical`)
//! - Search/category filtering and visit ordering (`collections`)
//! - Registration form validation (`validation`)
//!
//! Every function here is deterministic given its arguments plus a
//! caller-supplied "now"; nothing reads the clock, the environment, or any
//! global state, and nothing performs I/O. Expected failures are returned as
//! data (`Option` for "cannot compute", a field-to-message map for invalid
//! form input), never raised, so results compose safely into caller state.
//!
//! **No service concerns**: record storage and session scoping live in
//! `sakhi-store`; HTTP belongs to the `sakhi-run` binary.

pub mod clinical;
pub mod collections;
pub mod records;
pub mod temporal;
pub mod validation;

pub use records::{Child, DashboardStats, HealthExam, Mother, Notification, Visit, Vitals};
pub use validation::FieldErrors;
