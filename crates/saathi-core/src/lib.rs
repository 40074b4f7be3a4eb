//! Saathi core: domain models, state store, and persistence seam for a
//! local-first NGO activity-management tool.
//!
//! The crate is deliberately synchronous: all state lives in a single
//! [`store::NgoStore`] mutated from one thread, with every mutation
//! persisted slice-by-slice through the [`storage::SliceStorage`] adapter
//! and broadcast to subscribers.

pub mod activity;
pub mod downloads;
pub mod error;
pub mod form;
pub mod id;
pub mod language;
pub mod profile;
pub mod share_code;
pub mod storage;
pub mod store;

pub use error::{Result, SaathiError};
pub use store::NgoStore;
