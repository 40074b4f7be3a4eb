//! Store change events and the subscription registry.
//!
//! Mutations on the store broadcast a [`StoreEvent`] to registered
//! listeners after the affected slice has been persisted. This replaces the
//! original ambient-context pattern with an explicit observer mechanism.

use serde::{Deserialize, Serialize};

/// A change notification emitted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The NGO profile changed.
    ProfileChanged,
    /// An activity was inserted.
    ActivityAdded { id: String },
    /// An existing activity was modified.
    ActivityUpdated { id: String },
    /// An activity was removed.
    ActivityDeleted { id: String },
    /// The in-progress draft or wizard position changed.
    DraftChanged,
    /// The downloaded-files log changed.
    DownloadsChanged,
    /// The UI language preference changed.
    LanguageChanged,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

type Listener = Box<dyn Fn(&StoreEvent) + Send>;

/// Ordered listener registry. Listeners are invoked synchronously in
/// subscription order on the mutating call's thread.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener. Returns false if the id was already gone.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&self, event: &StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}
