use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use saathi_core::activity::Activity;
use saathi_core::downloads::NewDownloadedFile;
use saathi_core::profile::NgoProfile;
use saathi_core::NgoStore;
use saathi_infrastructure::SaathiPaths;

#[derive(Args)]
pub struct ReportArgs {
    /// Activity to report on
    pub activity_id: String,
    /// Output file; defaults to the exports directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(store: &mut NgoStore, args: ReportArgs) -> Result<()> {
    let activity = store
        .activity(&args.activity_id)
        .cloned()
        .with_context(|| format!("no activity with id '{}'", args.activity_id))?;

    let report = render(store.profile(), &activity);

    let path = match args.out {
        Some(path) => path,
        None => {
            let dir = SaathiPaths::exports_dir()?;
            fs::create_dir_all(&dir)?;
            dir.join(format!("activity-{}.txt", activity.id))
        }
    };
    fs::write(&path, report).with_context(|| format!("failed to write {}", path.display()))?;

    store.add_downloaded_file(NewDownloadedFile {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("activity-{}.txt", activity.id)),
        file_kind: "Text Report".to_string(),
        activity_id: activity.id.clone(),
        activity_name: activity.name.clone(),
    });

    println!("Report written to {}", path.display());
    Ok(())
}

/// Renders a plain-text activity report.
///
/// Stand-in for the external PDF collaborator: a pure function from the
/// activity (plus the organization header) to document text.
pub fn render(profile: &NgoProfile, activity: &Activity) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", profile.ngo_name));
    if !profile.registration_no.is_empty() {
        out.push_str(&format!("Registration no. {}\n", profile.registration_no));
    }
    out.push_str("\n");
    out.push_str(&format!("Activity report: {}\n", activity.name));
    out.push_str(&format!("Date:     {}\n", activity.date));
    out.push_str(&format!("Location: {}\n", activity.location));
    if !activity.contact_person.name.is_empty() {
        out.push_str(&format!(
            "Contact:  {} ({})\n",
            activity.contact_person.name, activity.contact_person.contact_no
        ));
    }
    if !activity.description.is_empty() {
        out.push_str(&format!("\n{}\n", activity.description));
    }

    if !activity.beneficiaries.is_empty() {
        out.push_str(&format!(
            "\nBeneficiaries ({})\n",
            activity.beneficiaries.len()
        ));
        for (index, beneficiary) in activity.beneficiaries.iter().enumerate() {
            let full_name = [
                beneficiary.first_name.as_str(),
                beneficiary.middle_name.as_str(),
                beneficiary.last_name.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
            out.push_str(&format!("  {}. {}", index + 1, full_name));
            if !beneficiary.age.is_empty() {
                out.push_str(&format!(", age {}", beneficiary.age));
            }
            out.push('\n');
        }
    }

    if !activity.documents.is_empty() {
        out.push_str(&format!("\nDocuments ({})\n", activity.documents.len()));
        for document in &activity.documents {
            out.push_str(&format!("  - {} [{:?}]", document.file_name, document.kind));
            if !document.comment.is_empty() {
                out.push_str(&format!(" {}", document.comment));
            }
            out.push('\n');
        }
    }

    if let Some(code) = activity.share_code.as_deref() {
        out.push_str(&format!("\nShare code: {}\n", code));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use saathi_core::activity::{Beneficiary, Document};
    use saathi_core::storage::MemorySliceStorage;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample_activity() -> Activity {
        let mut activity = Activity::blank("a-1");
        activity.name = "Health Camp".to_string();
        activity.date = "2024-01-10".to_string();
        activity.location = "Pune".to_string();
        let mut beneficiary = Beneficiary::blank("b-1");
        beneficiary.first_name = "Sita".to_string();
        beneficiary.age = "30".to_string();
        activity.beneficiaries.push(beneficiary);
        let mut document = Document::blank("d-1");
        document.file_name = "bill.jpg".to_string();
        activity.documents.push(document);
        activity.share_code = Some("ABCD-efgh-IJkl-Mn_p-k3f9".to_string());
        activity
    }

    #[test]
    fn test_render_contains_key_sections() {
        let profile = NgoProfile {
            ngo_name: "Asha Trust".to_string(),
            ..Default::default()
        };
        let report = render(&profile, &sample_activity());

        assert!(report.contains("Asha Trust"));
        assert!(report.contains("Activity report: Health Camp"));
        assert!(report.contains("Beneficiaries (1)"));
        assert!(report.contains("Sita, age 30"));
        assert!(report.contains("bill.jpg"));
        assert!(report.contains("Share code: ABCD-efgh-IJkl-Mn_p-k3f9"));
    }

    #[test]
    fn test_run_writes_file_and_records_download() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NgoStore::new(Arc::new(MemorySliceStorage::new()));
        store.add_activity(sample_activity()).unwrap();

        let out = temp_dir.path().join("camp.txt");
        run(
            &mut store,
            ReportArgs {
                activity_id: "a-1".to_string(),
                out: Some(out.clone()),
            },
        )
        .unwrap();

        assert!(out.exists());
        assert_eq!(store.downloads().len(), 1);
        assert_eq!(store.downloads()[0].file_name, "camp.txt");
        assert_eq!(store.downloads()[0].activity_id, "a-1");
    }

    #[test]
    fn test_run_fails_for_unknown_activity() {
        let mut store = NgoStore::new(Arc::new(MemorySliceStorage::new()));
        let err = run(
            &mut store,
            ReportArgs {
                activity_id: "missing".to_string(),
                out: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert!(store.downloads().is_empty());
    }
}
