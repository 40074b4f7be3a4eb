//! Activity domain models.
//!
//! An [`Activity`] is a recorded NGO event with an embedded contact person,
//! media attachments (data URIs), supporting [`Document`]s, and the
//! [`Beneficiary`] people it served. Documents and beneficiaries are owned
//! exclusively by their activity and are not independently addressable.
//!
//! All persisted structs serialize in camelCase to stay readable against
//! JSON blobs written by earlier releases.

use serde::{Deserialize, Serialize};

/// Contact person for an activity, embedded in [`Activity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub name: String,
    pub contact_no: String,
}

/// Closed category tag for a supporting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Bill,
    Receipt,
    Invoice,
    CashVoucher,
    Agenda,
    Resolution,
    #[default]
    Other,
}

/// A supporting document attached to an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub file_name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub comment: String,
    /// Preview of the uploaded file as a data URI, if one was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl Document {
    /// Creates a blank document with the given id.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: String::new(),
            kind: DocumentKind::Other,
            comment: String::new(),
            preview: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    #[default]
    Female,
    Male,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CasteCategory {
    #[default]
    General,
    Obc,
    #[serde(rename = "scst")]
    ScSt,
    Ews,
    Other,
}

/// Identity document kinds accepted for a beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum IdDocumentKind {
    #[default]
    Aadhar,
    Pan,
    #[serde(rename = "dl")]
    DrivingLicense,
    #[serde(rename = "election")]
    ElectionCard,
}

/// Address hierarchy for a beneficiary.
///
/// Earlier releases stored the address as one free-text string; that shape
/// is still accepted on read (see [`Beneficiary::address`]) and lands in
/// `state` with the finer fields left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub state: String,
    pub district: String,
    pub tehsil: String,
}

/// Accepts both the structured address object and the legacy plain string.
fn address_compat<'de, D>(deserializer: D) -> std::result::Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AddressRepr {
        Structured(Address),
        Legacy(String),
    }

    Ok(match AddressRepr::deserialize(deserializer)? {
        AddressRepr::Structured(address) => address,
        AddressRepr::Legacy(line) => Address {
            state: line,
            ..Address::default()
        },
    })
}

/// A person served by an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub caste: CasteCategory,
    /// Kept as free text; the original form never parsed it to a number.
    pub age: String,
    pub comment: String,
    pub contact_no: String,
    #[serde(default, deserialize_with = "address_compat")]
    pub address: Address,
    #[serde(rename = "documentType")]
    pub document_kind: IdDocumentKind,
    pub document_no: String,
    pub reference_name: String,
    pub reference_contact: String,
    pub photo: Option<String>,
}

impl Beneficiary {
    /// Creates a blank beneficiary with the given id.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            gender: Gender::Female,
            caste: CasteCategory::General,
            age: String::new(),
            comment: String::new(),
            contact_no: String::new(),
            address: Address::default(),
            document_kind: IdDocumentKind::Aadhar,
            document_no: String::new(),
            reference_name: String::new(),
            reference_contact: String::new(),
            photo: None,
        }
    }
}

/// A recorded NGO event.
///
/// Invariants: `id` is unique within the activity list (enforced by the
/// store at insert time); `share_code`, once generated, stays stable for the
/// activity's lifetime unless explicitly regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: String,
    #[serde(default)]
    pub contact_person: ContactPerson,
    pub description: String,
    /// Media attachments as data URIs.
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
    /// Set on first share or export, then stable.
    #[serde(default)]
    pub share_code: Option<String>,
}

impl Activity {
    /// Creates a blank activity with the given id.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location: String::new(),
            date: String::new(),
            contact_person: ContactPerson::default(),
            description: String::new(),
            media: Vec::new(),
            documents: Vec::new(),
            beneficiaries: Vec::new(),
            share_code: None,
        }
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn beneficiary(&self, id: &str) -> Option<&Beneficiary> {
        self.beneficiaries.iter().find(|b| b.id == id)
    }
}

/// Partial update for [`Activity`]; `None` fields are left untouched.
///
/// Nested document/beneficiary lists are replaced wholesale when present;
/// per-entry edits go through the store's draft sub-operations instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub contact_person: Option<ContactPerson>,
    pub description: Option<String>,
    pub media: Option<Vec<String>>,
    pub documents: Option<Vec<Document>>,
    pub beneficiaries: Option<Vec<Beneficiary>>,
    pub share_code: Option<Option<String>>,
}

impl ActivityUpdate {
    /// Shallow-merges this update into `activity`. The id is never changed.
    pub fn apply(self, activity: &mut Activity) {
        if let Some(name) = self.name {
            activity.name = name;
        }
        if let Some(location) = self.location {
            activity.location = location;
        }
        if let Some(date) = self.date {
            activity.date = date;
        }
        if let Some(contact_person) = self.contact_person {
            activity.contact_person = contact_person;
        }
        if let Some(description) = self.description {
            activity.description = description;
        }
        if let Some(media) = self.media {
            activity.media = media;
        }
        if let Some(documents) = self.documents {
            activity.documents = documents;
        }
        if let Some(beneficiaries) = self.beneficiaries {
            activity.beneficiaries = beneficiaries;
        }
        if let Some(share_code) = self.share_code {
            activity.share_code = share_code;
        }
    }
}

/// Partial update for a [`Document`] inside the draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub file_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<DocumentKind>,
    pub comment: Option<String>,
    pub preview: Option<Option<String>>,
}

impl DocumentUpdate {
    pub fn apply(self, document: &mut Document) {
        if let Some(file_name) = self.file_name {
            document.file_name = file_name;
        }
        if let Some(kind) = self.kind {
            document.kind = kind;
        }
        if let Some(comment) = self.comment {
            document.comment = comment;
        }
        if let Some(preview) = self.preview {
            document.preview = preview;
        }
    }
}

/// Partial update for a [`Beneficiary`] inside the draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub caste: Option<CasteCategory>,
    pub age: Option<String>,
    pub comment: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<Address>,
    #[serde(rename = "documentType")]
    pub document_kind: Option<IdDocumentKind>,
    pub document_no: Option<String>,
    pub reference_name: Option<String>,
    pub reference_contact: Option<String>,
    pub photo: Option<Option<String>>,
}

impl BeneficiaryUpdate {
    pub fn apply(self, beneficiary: &mut Beneficiary) {
        if let Some(first_name) = self.first_name {
            beneficiary.first_name = first_name;
        }
        if let Some(middle_name) = self.middle_name {
            beneficiary.middle_name = middle_name;
        }
        if let Some(last_name) = self.last_name {
            beneficiary.last_name = last_name;
        }
        if let Some(gender) = self.gender {
            beneficiary.gender = gender;
        }
        if let Some(caste) = self.caste {
            beneficiary.caste = caste;
        }
        if let Some(age) = self.age {
            beneficiary.age = age;
        }
        if let Some(comment) = self.comment {
            beneficiary.comment = comment;
        }
        if let Some(contact_no) = self.contact_no {
            beneficiary.contact_no = contact_no;
        }
        if let Some(address) = self.address {
            beneficiary.address = address;
        }
        if let Some(document_kind) = self.document_kind {
            beneficiary.document_kind = document_kind;
        }
        if let Some(document_no) = self.document_no {
            beneficiary.document_no = document_no;
        }
        if let Some(reference_name) = self.reference_name {
            beneficiary.reference_name = reference_name;
        }
        if let Some(reference_contact) = self.reference_contact {
            beneficiary.reference_contact = reference_contact;
        }
        if let Some(photo) = self.photo {
            beneficiary.photo = photo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_activity() {
        let activity = Activity::blank("a-1");
        assert_eq!(activity.id, "a-1");
        assert!(activity.name.is_empty());
        assert!(activity.media.is_empty());
        assert!(activity.documents.is_empty());
        assert!(activity.beneficiaries.is_empty());
        assert!(activity.share_code.is_none());
    }

    #[test]
    fn test_activity_update_preserves_untouched_fields() {
        let mut activity = Activity::blank("a-1");
        activity.name = "Health Camp".to_string();
        activity.location = "Pune".to_string();

        ActivityUpdate {
            date: Some("2024-01-10".to_string()),
            ..Default::default()
        }
        .apply(&mut activity);

        assert_eq!(activity.name, "Health Camp");
        assert_eq!(activity.location, "Pune");
        assert_eq!(activity.date, "2024-01-10");
    }

    #[test]
    fn test_beneficiary_update_age_only() {
        let mut beneficiary = Beneficiary::blank("b1");
        beneficiary.first_name = "Sita".to_string();

        BeneficiaryUpdate {
            age: Some("30".to_string()),
            ..Default::default()
        }
        .apply(&mut beneficiary);

        assert_eq!(beneficiary.age, "30");
        assert_eq!(beneficiary.first_name, "Sita");
        assert_eq!(beneficiary.gender, Gender::Female);
    }

    #[test]
    fn test_closed_set_wire_names() {
        let json = serde_json::to_string(&DocumentKind::CashVoucher).unwrap();
        assert_eq!(json, "\"cashVoucher\"");
        let json = serde_json::to_string(&CasteCategory::ScSt).unwrap();
        assert_eq!(json, "\"scst\"");
        let json = serde_json::to_string(&IdDocumentKind::DrivingLicense).unwrap();
        assert_eq!(json, "\"dl\"");
    }

    #[test]
    fn test_activity_round_trip() {
        let mut activity = Activity::blank("a-1");
        activity.name = "Tree Plantation".to_string();
        activity.documents.push(Document::blank("d-1"));
        activity.beneficiaries.push(Beneficiary::blank("b-1"));

        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn test_beneficiary_accepts_legacy_string_address() {
        // Blobs from older releases carry a single free-text address line.
        let json = r#"{
            "id": "b-1",
            "firstName": "Sita",
            "middleName": "",
            "lastName": "Devi",
            "gender": "female",
            "caste": "general",
            "age": "30",
            "comment": "",
            "contactNo": "",
            "address": "Ward 4, Shivaji Nagar",
            "documentType": "aadhar",
            "documentNo": "",
            "referenceName": "",
            "referenceContact": "",
            "photo": null
        }"#;
        let beneficiary: Beneficiary = serde_json::from_str(json).unwrap();
        assert_eq!(beneficiary.address.state, "Ward 4, Shivaji Nagar");
        assert!(beneficiary.address.district.is_empty());
        assert!(beneficiary.address.tehsil.is_empty());
    }

    #[test]
    fn test_beneficiary_accepts_structured_address() {
        let json = r#"{
            "id": "b-2",
            "firstName": "Ram",
            "middleName": "",
            "lastName": "",
            "gender": "male",
            "caste": "obc",
            "age": "",
            "comment": "",
            "contactNo": "",
            "address": { "state": "Maharashtra", "district": "Pune" },
            "documentType": "pan",
            "documentNo": "",
            "referenceName": "",
            "referenceContact": "",
            "photo": null
        }"#;
        let beneficiary: Beneficiary = serde_json::from_str(json).unwrap();
        assert_eq!(beneficiary.address.state, "Maharashtra");
        assert_eq!(beneficiary.address.district, "Pune");
        assert!(beneficiary.address.tehsil.is_empty());
    }

    #[test]
    fn test_activity_deserializes_without_optional_lists() {
        // Older blobs may omit empty collections entirely.
        let json = r#"{
            "id": "a-9",
            "name": "Camp",
            "location": "",
            "date": "",
            "description": ""
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.media.is_empty());
        assert!(activity.share_code.is_none());
    }
}
