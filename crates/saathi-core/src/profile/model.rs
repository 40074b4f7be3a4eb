//! NGO profile domain model.
//!
//! One profile exists per installation. It is created with defaults on first
//! load, mutated via partial updates, and never deleted.

use serde::{Deserialize, Serialize};

/// Whether this installation is a parent organization or a child chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    #[default]
    Parent,
    Child,
}

/// Organization identity for the installation.
///
/// Serialized in camelCase so the on-disk JSON matches the blobs written by
/// earlier browser-based releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NgoProfile {
    pub ngo_name: String,
    /// Organization photo as a data URI, if one was uploaded.
    pub photo: Option<String>,
    pub registration_no: String,
    pub registration_date: String,
    /// Thematic working areas (e.g., "health", "education").
    #[serde(default)]
    pub working_areas: Vec<String>,
    pub contact_no: String,
    pub email: String,
    pub website: String,
    #[serde(default)]
    pub account_type: AccountType,
}

impl NgoProfile {
    /// Creates an empty profile with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Partial update for [`NgoProfile`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub ngo_name: Option<String>,
    pub photo: Option<Option<String>>,
    pub registration_no: Option<String>,
    pub registration_date: Option<String>,
    pub working_areas: Option<Vec<String>>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub account_type: Option<AccountType>,
}

impl ProfileUpdate {
    /// Shallow-merges this update into `profile`.
    pub fn apply(self, profile: &mut NgoProfile) {
        if let Some(ngo_name) = self.ngo_name {
            profile.ngo_name = ngo_name;
        }
        if let Some(photo) = self.photo {
            profile.photo = photo;
        }
        if let Some(registration_no) = self.registration_no {
            profile.registration_no = registration_no;
        }
        if let Some(registration_date) = self.registration_date {
            profile.registration_date = registration_date;
        }
        if let Some(working_areas) = self.working_areas {
            profile.working_areas = working_areas;
        }
        if let Some(contact_no) = self.contact_no {
            profile.contact_no = contact_no;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(website) = self.website {
            profile.website = website;
        }
        if let Some(account_type) = self.account_type {
            profile.account_type = account_type;
        }
    }
}
