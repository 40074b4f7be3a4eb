use anyhow::Result;
use clap::Subcommand;

use saathi_core::language::Language;
use saathi_core::NgoStore;

#[derive(Subcommand)]
pub enum LanguageAction {
    /// Print the current language tag
    Get,
    /// Set the language ("en" or "hi")
    Set { tag: String },
}

pub fn run(store: &mut NgoStore, action: LanguageAction) -> Result<()> {
    match action {
        LanguageAction::Get => println!("{}", store.language()),
        LanguageAction::Set { tag } => {
            let language = Language::from_tag(&tag)
                .ok_or_else(|| anyhow::anyhow!("unsupported language '{}'", tag))?;
            store.set_language(language);
            println!("Language set to {}", language);
        }
    }
    Ok(())
}
