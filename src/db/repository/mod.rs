//! Repository layer — table-scoped database operations.
//!
//! One sub-module per table; all public functions are re-exported here.

mod account;
mod appointment;
mod booking_key;
mod prescription;
mod profile;
mod session;

pub use account::*;
pub use appointment::*;
pub use booking_key::*;
pub use prescription::*;
pub use profile::*;
pub use session::*;
