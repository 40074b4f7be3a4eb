use anyhow::Result;
use clap::Subcommand;

use saathi_core::NgoStore;

#[derive(Subcommand)]
pub enum DownloadsAction {
    /// List recorded downloads, newest first
    List,
    /// Remove one download record
    Remove { id: String },
    /// Clear the whole log
    Clear,
}

pub fn run(store: &mut NgoStore, action: DownloadsAction) -> Result<()> {
    match action {
        DownloadsAction::List => {
            if store.downloads().is_empty() {
                println!("No downloads recorded yet");
            }
            for file in store.downloads() {
                println!(
                    "{}  {}  {}  ({}, {})",
                    file.id, file.downloaded_at, file.file_name, file.file_kind, file.activity_name
                );
            }
        }
        DownloadsAction::Remove { id } => {
            store.remove_downloaded_file(&id)?;
            println!("Removed download record {}", id);
        }
        DownloadsAction::Clear => {
            store.clear_downloaded_files();
            println!("Cleared the downloads log");
        }
    }
    Ok(())
}
