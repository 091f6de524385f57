use anyhow::Result;

use caravan::settings::{overrides_file, overrides_file_exists, save_overrides, AliasOverrides};

/// Write a starter alias-override file for the operator to edit.
pub fn run() -> Result<()> {
    let path = overrides_file();
    if overrides_file_exists() {
        println!("Alias overrides already exist at {}", path.display());
        return Ok(());
    }
    save_overrides(&AliasOverrides::default())?;
    println!("Created {}", path.display());
    println!("Add synonyms there to teach the resolver new spellings without a rebuild.");
    Ok(())
}
