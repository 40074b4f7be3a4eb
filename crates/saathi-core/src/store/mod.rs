//! The application state store.
//!
//! [`NgoStore`] is the single authoritative in-memory holder of the four
//! persisted slices (profile, activities, downloads log, language) plus the
//! transient form draft, and the sole writer to the persistence adapter.
//! Every mutation updates memory synchronously, persists the affected slice,
//! and then notifies subscribers.
//!
//! A failed persistence write never rolls back the in-memory update: the
//! failure is logged and durability is lost for that write, matching the
//! degrade-silently contract of the storage layer.

pub mod event;

use std::sync::Arc;

use tracing::warn;

use crate::activity::{
    Activity, ActivityUpdate, Beneficiary, BeneficiaryUpdate, Document, DocumentUpdate,
};
use crate::downloads::{DownloadedFile, NewDownloadedFile};
use crate::error::{Result, SaathiError};
use crate::form::{FormState, FIRST_STEP, LAST_STEP};
use crate::id::{IdProvider, UuidIdProvider};
use crate::language::Language;
use crate::profile::{NgoProfile, ProfileUpdate};
use crate::share_code;
use crate::storage::{keys, SliceStorage, SliceStorageExt};

use event::{StoreEvent, Subscribers, SubscriptionId};

/// Single-session application state store.
pub struct NgoStore {
    storage: Arc<dyn SliceStorage>,
    ids: Arc<dyn IdProvider>,
    profile: NgoProfile,
    activities: Vec<Activity>,
    form: FormState,
    downloads: Vec<DownloadedFile>,
    language: Language,
    subscribers: Subscribers,
}

impl NgoStore {
    /// Opens a store over the given storage with UUID-based ids.
    pub fn new(storage: Arc<dyn SliceStorage>) -> Self {
        Self::with_id_provider(storage, Arc::new(UuidIdProvider))
    }

    /// Opens a store with an explicit id provider (tests use a sequential
    /// one for deterministic ids).
    ///
    /// Each slice is loaded with its slice-specific default: empty profile,
    /// empty activity list, empty download log, default language. The form
    /// always starts as a fresh blank draft; drafts are not persisted.
    pub fn with_id_provider(storage: Arc<dyn SliceStorage>, ids: Arc<dyn IdProvider>) -> Self {
        let profile = storage.load_or(keys::PROFILE, NgoProfile::default());
        let activities = storage.load_or(keys::ACTIVITIES, Vec::new());
        let downloads = storage.load_or(keys::DOWNLOADED_FILES, Vec::new());
        let language = storage.load_or(keys::LANGUAGE, Language::default());
        let form = FormState::fresh(Activity::blank(ids.next_id()));

        Self {
            storage,
            ids,
            profile,
            activities,
            form,
            downloads,
            language,
            subscribers: Subscribers::default(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn profile(&self) -> &NgoProfile {
        &self.profile
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn downloads(&self) -> &[DownloadedFile] {
        &self.downloads
    }

    pub fn language(&self) -> Language {
        self.language
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Registers a listener invoked synchronously after each mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Removes a listener; returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Replaces the whole profile.
    pub fn set_profile(&mut self, profile: NgoProfile) {
        self.profile = profile;
        self.persist_profile();
        self.subscribers.emit(&StoreEvent::ProfileChanged);
    }

    /// Shallow-merges `update` into the profile. Always succeeds.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        update.apply(&mut self.profile);
        self.persist_profile();
        self.subscribers.emit(&StoreEvent::ProfileChanged);
    }

    // ------------------------------------------------------------------
    // Activities
    // ------------------------------------------------------------------

    /// Appends a pre-populated activity.
    ///
    /// Rejects a duplicate id with a validation error; id uniqueness within
    /// the list is a store invariant.
    pub fn add_activity(&mut self, activity: Activity) -> Result<()> {
        if self.activities.iter().any(|a| a.id == activity.id) {
            return Err(SaathiError::validation(format!(
                "activity id '{}' already exists",
                activity.id
            )));
        }
        let id = activity.id.clone();
        self.activities.push(activity);
        self.persist_activities();
        self.subscribers.emit(&StoreEvent::ActivityAdded { id });
        Ok(())
    }

    /// Shallow-merges `update` into the activity matching `id`.
    pub fn update_activity(&mut self, id: &str, update: ActivityUpdate) -> Result<()> {
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SaathiError::not_found("activity", id))?;
        update.apply(activity);
        self.persist_activities();
        self.subscribers.emit(&StoreEvent::ActivityUpdated { id: id.to_string() });
        Ok(())
    }

    /// Removes the activity matching `id`.
    pub fn delete_activity(&mut self, id: &str) -> Result<()> {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != id);
        if self.activities.len() == before {
            return Err(SaathiError::not_found("activity", id));
        }
        self.persist_activities();
        self.subscribers.emit(&StoreEvent::ActivityDeleted { id: id.to_string() });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Form draft
    // ------------------------------------------------------------------

    /// Resets the form to a fresh blank draft in create mode.
    pub fn reset_form(&mut self) {
        self.form = FormState::fresh(Activity::blank(self.ids.next_id()));
        self.subscribers.emit(&StoreEvent::DraftChanged);
    }

    /// Starts a new entry; identical to [`Self::reset_form`].
    pub fn start_new_activity(&mut self) {
        self.reset_form();
    }

    /// Begins editing an existing activity by copying it into the draft.
    pub fn start_editing_activity(&mut self, id: &str) -> Result<()> {
        let activity = self
            .activity(id)
            .cloned()
            .ok_or_else(|| SaathiError::not_found("activity", id))?;
        self.form = FormState::editing(activity);
        self.subscribers.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    /// Moves the wizard to `step`, clamped to the valid range. The store
    /// does not enforce step ordering; navigation is caller-driven.
    pub fn set_step(&mut self, step: u8) {
        self.form.step = step.clamp(FIRST_STEP, LAST_STEP);
        self.subscribers.emit(&StoreEvent::DraftChanged);
    }

    /// Shallow-merges `update` into the draft. Never touches the persisted
    /// activity list.
    pub fn update_draft(&mut self, update: ActivityUpdate) {
        update.apply(&mut self.form.draft);
        self.subscribers.emit(&StoreEvent::DraftChanged);
    }

    /// Appends a batch of media data URIs to the draft in one commit, so
    /// insertion order matches the caller's read order.
    pub fn add_media_to_draft(&mut self, media: Vec<String>) {
        self.form.draft.media.extend(media);
        self.subscribers.emit(&StoreEvent::DraftChanged);
    }

    /// Adds a blank document to the draft and returns its id.
    pub fn add_document_to_draft(&mut self) -> String {
        let id = self.ids.next_id();
        self.form.draft.documents.push(Document::blank(id.clone()));
        self.subscribers.emit(&StoreEvent::DraftChanged);
        id
    }

    pub fn update_document_in_draft(&mut self, id: &str, update: DocumentUpdate) -> Result<()> {
        let document = self
            .form
            .draft
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| SaathiError::not_found("document", id))?;
        update.apply(document);
        self.subscribers.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    pub fn remove_document_from_draft(&mut self, id: &str) -> Result<()> {
        let before = self.form.draft.documents.len();
        self.form.draft.documents.retain(|d| d.id != id);
        if self.form.draft.documents.len() == before {
            return Err(SaathiError::not_found("document", id));
        }
        self.subscribers.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    /// Adds a blank beneficiary to the draft and returns its id.
    pub fn add_beneficiary_to_draft(&mut self) -> String {
        let id = self.ids.next_id();
        self.form
            .draft
            .beneficiaries
            .push(Beneficiary::blank(id.clone()));
        self.subscribers.emit(&StoreEvent::DraftChanged);
        id
    }

    pub fn update_beneficiary_in_draft(&mut self, id: &str, update: BeneficiaryUpdate) -> Result<()> {
        let beneficiary = self
            .form
            .draft
            .beneficiaries
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| SaathiError::not_found("beneficiary", id))?;
        update.apply(beneficiary);
        self.subscribers.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    pub fn remove_beneficiary_from_draft(&mut self, id: &str) -> Result<()> {
        let before = self.form.draft.beneficiaries.len();
        self.form.draft.beneficiaries.retain(|b| b.id != id);
        if self.form.draft.beneficiaries.len() == before {
            return Err(SaathiError::not_found("beneficiary", id));
        }
        self.subscribers.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    /// Commits the draft into the activity list.
    ///
    /// A share code is generated first if the draft has none. With an
    /// `editing_id` set the target activity is replaced wholesale; otherwise
    /// the draft is inserted. The form is reset to a fresh blank draft
    /// whether or not the commit succeeds. Returns the committed activity's
    /// id.
    pub fn save_activity(&mut self) -> Result<String> {
        let mut draft = self.form.draft.clone();
        if draft.share_code.as_deref().map_or(true, str::is_empty) {
            draft.share_code = Some(share_code::generate());
        }

        let result = match self.form.editing_id.clone() {
            Some(editing_id) => {
                match self.activities.iter_mut().find(|a| a.id == editing_id) {
                    Some(slot) => {
                        draft.id = editing_id.clone();
                        *slot = draft;
                        self.persist_activities();
                        self.subscribers.emit(&StoreEvent::ActivityUpdated {
                            id: editing_id.clone(),
                        });
                        Ok(editing_id)
                    }
                    None => Err(SaathiError::not_found("activity", editing_id)),
                }
            }
            None => {
                let id = draft.id.clone();
                if self.activities.iter().any(|a| a.id == id) {
                    Err(SaathiError::validation(format!(
                        "activity id '{}' already exists",
                        id
                    )))
                } else {
                    self.activities.push(draft);
                    self.persist_activities();
                    self.subscribers
                        .emit(&StoreEvent::ActivityAdded { id: id.clone() });
                    Ok(id)
                }
            }
        };

        self.reset_form();
        result
    }

    // ------------------------------------------------------------------
    // Share codes
    // ------------------------------------------------------------------

    /// Looks up an activity by its share code.
    ///
    /// Malformed codes are rejected by the format check before the scan, so
    /// a garbage string never walks the list.
    pub fn activity_by_code(&self, code: &str) -> Option<&Activity> {
        if !share_code::is_valid(code) {
            return None;
        }
        self.activities
            .iter()
            .find(|a| a.share_code.as_deref() == Some(code))
    }

    /// Returns the activity's share code, generating and persisting one on
    /// first use. A code, once set, is returned unchanged on later calls.
    pub fn share_code_for_activity(&mut self, id: &str) -> Result<String> {
        let activity = self
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SaathiError::not_found("activity", id))?;

        if let Some(code) = activity.share_code.as_deref() {
            if !code.is_empty() {
                return Ok(code.to_string());
            }
        }

        let code = share_code::generate();
        activity.share_code = Some(code.clone());
        self.persist_activities();
        self.subscribers.emit(&StoreEvent::ActivityUpdated { id: id.to_string() });
        Ok(code)
    }

    // ------------------------------------------------------------------
    // Downloads log
    // ------------------------------------------------------------------

    /// Records a generated export, newest first. Returns the record id.
    pub fn add_downloaded_file(&mut self, record: NewDownloadedFile) -> String {
        let id = self.ids.next_id();
        let downloaded_at = chrono::Local::now().format("%d %b %Y, %H:%M").to_string();
        self.downloads
            .insert(0, DownloadedFile::from_new(id.clone(), record, downloaded_at));
        self.persist_downloads();
        self.subscribers.emit(&StoreEvent::DownloadsChanged);
        id
    }

    pub fn remove_downloaded_file(&mut self, id: &str) -> Result<()> {
        let before = self.downloads.len();
        self.downloads.retain(|d| d.id != id);
        if self.downloads.len() == before {
            return Err(SaathiError::not_found("download", id));
        }
        self.persist_downloads();
        self.subscribers.emit(&StoreEvent::DownloadsChanged);
        Ok(())
    }

    pub fn clear_downloaded_files(&mut self) {
        self.downloads.clear();
        self.persist_downloads();
        self.subscribers.emit(&StoreEvent::DownloadsChanged);
    }

    // ------------------------------------------------------------------
    // Language
    // ------------------------------------------------------------------

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(err) = self.storage.save(keys::LANGUAGE, &self.language) {
            warn!(key = keys::LANGUAGE, %err, "failed to persist slice");
        }
        self.subscribers.emit(&StoreEvent::LanguageChanged);
    }

    // ------------------------------------------------------------------
    // Persistence helpers
    // ------------------------------------------------------------------

    fn persist_profile(&self) {
        if let Err(err) = self.storage.save(keys::PROFILE, &self.profile) {
            warn!(key = keys::PROFILE, %err, "failed to persist slice");
        }
    }

    fn persist_activities(&self) {
        if let Err(err) = self.storage.save(keys::ACTIVITIES, &self.activities) {
            warn!(key = keys::ACTIVITIES, %err, "failed to persist slice");
        }
    }

    fn persist_downloads(&self) {
        if let Err(err) = self.storage.save(keys::DOWNLOADED_FILES, &self.downloads) {
            warn!(key = keys::DOWNLOADED_FILES, %err, "failed to persist slice");
        }
    }
}

impl std::fmt::Debug for NgoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NgoStore")
            .field("activities", &self.activities.len())
            .field("downloads", &self.downloads.len())
            .field("editing_id", &self.form.editing_id)
            .field("language", &self.language)
            .finish()
    }
}
