pub mod account;
pub mod appointment;
pub mod enums;
pub mod filters;
pub mod prescription;
pub mod profile;

pub use account::*;
pub use appointment::*;
pub use enums::*;
pub use filters::*;
pub use prescription::*;
pub use profile::*;
