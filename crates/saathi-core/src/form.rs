//! Multi-step form draft state.

use serde::{Deserialize, Serialize};

use crate::activity::Activity;

/// First wizard step.
pub const FIRST_STEP: u8 = 1;
/// Last wizard step (details, beneficiaries, documents).
pub const LAST_STEP: u8 = 3;

/// Transient editing state for the activity wizard.
///
/// A draft always exists once the store is constructed; "no draft" is not a
/// representable state. The draft is replaced with a fresh blank activity
/// when a new entry starts or after a successful save, and with a copy of an
/// existing activity when editing begins. Deliberately not persisted: the
/// draft dies with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Current wizard step, 1 through [`LAST_STEP`]. The store clamps but
    /// does not enforce ordering; navigation is caller-driven.
    pub step: u8,
    /// Id of the activity being edited, or `None` when creating a new one.
    pub editing_id: Option<String>,
    /// Working copy committed by `save_activity`.
    pub draft: Activity,
}

impl FormState {
    /// Creates a fresh create-mode form around a blank draft.
    pub fn fresh(draft: Activity) -> Self {
        Self {
            step: FIRST_STEP,
            editing_id: None,
            draft,
        }
    }

    /// Creates an edit-mode form around a copy of an existing activity.
    pub fn editing(activity: Activity) -> Self {
        Self {
            step: FIRST_STEP,
            editing_id: Some(activity.id.clone()),
            draft: activity,
        }
    }

    /// Whether the form is editing an existing activity.
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_form_is_create_mode() {
        let form = FormState::fresh(Activity::blank("a-1"));
        assert_eq!(form.step, FIRST_STEP);
        assert!(!form.is_editing());
        assert_eq!(form.draft.id, "a-1");
    }

    #[test]
    fn test_editing_form_tracks_source_id() {
        let mut activity = Activity::blank("a-2");
        activity.name = "Blood Donation".to_string();
        let form = FormState::editing(activity);
        assert_eq!(form.editing_id.as_deref(), Some("a-2"));
        assert_eq!(form.draft.name, "Blood Donation");
    }
}
