//! Identifier generation.
//!
//! Every entity id in the application (activities, documents, beneficiaries,
//! download records) is produced through the [`IdProvider`] seam so the
//! uniqueness guarantee can be swapped without touching call sites.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// An abstract source of unique string identifiers.
pub trait IdProvider: Send + Sync {
    /// Returns a fresh identifier, unique for the lifetime of the store.
    fn next_id(&self) -> String;
}

/// Production id provider backed by UUID v4.
#[derive(Debug, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic id provider for tests: `id-1`, `id-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("id-{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_unique() {
        let provider = UuidIdProvider;
        let a = provider.next_id();
        let b = provider.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_sequential_ids() {
        let provider = SequentialIdProvider::new();
        assert_eq!(provider.next_id(), "id-1");
        assert_eq!(provider.next_id(), "id-2");
    }
}
