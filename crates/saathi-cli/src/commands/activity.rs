use anyhow::Result;
use clap::Subcommand;

use saathi_core::activity::{ActivityUpdate, BeneficiaryUpdate, ContactPerson, DocumentUpdate};
use saathi_core::NgoStore;

#[derive(Subcommand)]
pub enum ActivityAction {
    /// List recorded activities
    List,
    /// Record a new activity
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Activity date, e.g. 2024-01-10
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        contact_name: Option<String>,
        #[arg(long)]
        contact_no: Option<String>,
        /// Media data URI; repeat for several
        #[arg(long = "media")]
        media: Vec<String>,
        /// Beneficiary first name; repeat for several
        #[arg(long = "beneficiary")]
        beneficiaries: Vec<String>,
        /// Supporting document file name; repeat for several
        #[arg(long = "document")]
        documents: Vec<String>,
    },
    /// Show one activity in full
    Show { id: String },
    /// Delete an activity
    Delete { id: String },
    /// Print (generating if needed) an activity's share code
    Code { id: String },
    /// Look up an activity by share code
    Find {
        #[arg(long)]
        code: String,
    },
}

pub fn run(store: &mut NgoStore, action: ActivityAction) -> Result<()> {
    match action {
        ActivityAction::List => {
            if store.activities().is_empty() {
                println!("No activities recorded yet");
            }
            for activity in store.activities() {
                println!(
                    "{}  {}  {}  ({} beneficiaries, {} documents)",
                    activity.id,
                    activity.date,
                    activity.name,
                    activity.beneficiaries.len(),
                    activity.documents.len(),
                );
            }
        }
        ActivityAction::Add {
            name,
            location,
            date,
            description,
            contact_name,
            contact_no,
            media,
            beneficiaries,
            documents,
        } => {
            // Drive the same wizard path the form uses: draft, sub-ops, save.
            store.start_new_activity();
            store.update_draft(ActivityUpdate {
                name: Some(name),
                location: Some(location),
                date: Some(date),
                description: Some(description),
                contact_person: match (contact_name, contact_no) {
                    (None, None) => None,
                    (contact_name, contact_no) => Some(ContactPerson {
                        name: contact_name.unwrap_or_default(),
                        contact_no: contact_no.unwrap_or_default(),
                    }),
                },
                ..Default::default()
            });
            store.add_media_to_draft(media);
            for first_name in beneficiaries {
                let id = store.add_beneficiary_to_draft();
                store.update_beneficiary_in_draft(
                    &id,
                    BeneficiaryUpdate {
                        first_name: Some(first_name),
                        ..Default::default()
                    },
                )?;
            }
            for file_name in documents {
                let id = store.add_document_to_draft();
                store.update_document_in_draft(
                    &id,
                    DocumentUpdate {
                        file_name: Some(file_name),
                        ..Default::default()
                    },
                )?;
            }

            let id = store.save_activity()?;
            println!("Recorded activity {}", id);
        }
        ActivityAction::Show { id } => {
            let activity = store
                .activity(&id)
                .ok_or_else(|| anyhow::anyhow!("no activity with id '{}'", id))?;
            println!("Name:        {}", activity.name);
            println!("Location:    {}", activity.location);
            println!("Date:        {}", activity.date);
            println!("Contact:     {} {}", activity.contact_person.name, activity.contact_person.contact_no);
            println!("Description: {}", activity.description);
            println!("Share code:  {}", activity.share_code.as_deref().unwrap_or("-"));
            println!("Media:       {}", activity.media.len());
            for document in &activity.documents {
                println!("Document:    {} ({:?})", document.file_name, document.kind);
            }
            for beneficiary in &activity.beneficiaries {
                println!(
                    "Beneficiary: {} {} {}",
                    beneficiary.first_name, beneficiary.middle_name, beneficiary.last_name
                );
            }
        }
        ActivityAction::Delete { id } => {
            store.delete_activity(&id)?;
            println!("Deleted activity {}", id);
        }
        ActivityAction::Code { id } => {
            let code = store.share_code_for_activity(&id)?;
            println!("{}", code);
        }
        ActivityAction::Find { code } => match store.activity_by_code(&code) {
            Some(activity) => println!("{}  {}", activity.id, activity.name),
            None => println!("No activity matches that code"),
        },
    }
    Ok(())
}
