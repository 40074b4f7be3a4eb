pub mod activity;
pub mod downloads;
pub mod language;
pub mod profile;
pub mod report;
