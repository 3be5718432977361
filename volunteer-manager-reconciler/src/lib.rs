//! Consistency checks for volunteer events.
//!
//! Everything in here works on data that was already loaded for a single
//! event. Nothing touches the database or the network, so every function is
//! cheap to call once per request and easy to test.

extern crate alloc;

pub mod colour;
pub mod error;
pub mod hotels;
pub mod model;
pub mod nights;
pub mod outbox;
pub mod shifts;
pub mod trainings;

pub use colour::GradientCache;
pub use error::{ReconcileError, UnknownValue};
pub use model::{ApplicationStatus, SelectOption, UserId, Volunteer, Warning};
