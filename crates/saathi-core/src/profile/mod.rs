//! NGO profile domain.

pub mod model;

pub use model::{AccountType, NgoProfile, ProfileUpdate};
