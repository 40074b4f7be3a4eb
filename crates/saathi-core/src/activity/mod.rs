//! Activity domain: recorded events with their documents and beneficiaries.

pub mod model;

pub use model::{
    Activity, ActivityUpdate, Address, Beneficiary, BeneficiaryUpdate, CasteCategory,
    ContactPerson, Document, DocumentKind, DocumentUpdate, Gender, IdDocumentKind,
};
