use anyhow::Result;
use clap::Subcommand;

use saathi_core::profile::ProfileUpdate;
use saathi_core::NgoStore;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the current profile
    Show,
    /// Update profile fields; unset flags are left untouched
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        registration_no: Option<String>,
        #[arg(long)]
        registration_date: Option<String>,
        /// Thematic working area; repeat to set several
        #[arg(long = "working-area")]
        working_areas: Vec<String>,
        #[arg(long)]
        contact_no: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
}

pub fn run(store: &mut NgoStore, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let profile = store.profile();
            println!("Name:              {}", profile.ngo_name);
            println!("Registration no.:  {}", profile.registration_no);
            println!("Registration date: {}", profile.registration_date);
            println!("Working areas:     {}", profile.working_areas.join(", "));
            println!("Contact:           {}", profile.contact_no);
            println!("Email:             {}", profile.email);
            println!("Website:           {}", profile.website);
        }
        ProfileAction::Set {
            name,
            registration_no,
            registration_date,
            working_areas,
            contact_no,
            email,
            website,
        } => {
            store.update_profile(ProfileUpdate {
                ngo_name: name,
                registration_no,
                registration_date,
                working_areas: if working_areas.is_empty() {
                    None
                } else {
                    Some(working_areas)
                },
                contact_no,
                email,
                website,
                ..Default::default()
            });
            println!("Profile updated");
        }
    }
    Ok(())
}
