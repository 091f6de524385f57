use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::aliases::{AliasBook, RoomType};
use crate::error::{CaravanError, Result};

/// Operator-maintained extensions to the built-in synonym tables. Sheets grow
/// new spellings faster than releases ship; this file lets an operator teach
/// the resolver without a rebuild. Everything is additive: built-in synonyms
/// cannot be removed, only extended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasOverrides {
    /// Room code ("SGL", "DBL", "TWIN", "TRPL", "QUAD") → extra synonyms.
    #[serde(default)]
    pub rooms: HashMap<String, Vec<String>>,
    /// Meal code ("HB", "BB", "FB", "AI") → extra synonyms.
    #[serde(default)]
    pub meals: HashMap<String, Vec<String>>,
    /// City tag → extra synonyms; unknown tags add a new city.
    #[serde(default)]
    pub cities: HashMap<String, Vec<String>>,
    /// Package family tag → extra synonyms; unknown tags add a new family.
    #[serde(default)]
    pub packages: HashMap<String, Vec<String>>,
    /// Extra mutually-equivalent family pairs.
    #[serde(default)]
    pub equivalent_packages: Vec<(String, String)>,
    /// Extra non-person denylist tokens.
    #[serde(default)]
    pub noise: Vec<String>,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("caravan")
}

fn overrides_path() -> PathBuf {
    config_dir().join("aliases.json")
}

/// Where the override file lives, for messages and `init`.
pub fn overrides_file() -> PathBuf {
    overrides_path()
}

pub fn overrides_file_exists() -> bool {
    overrides_path().exists()
}

/// Load overrides leniently: a missing or unreadable file is just "no
/// overrides", matching how the engine treats every other optional input.
pub fn load_overrides() -> AliasOverrides {
    load_overrides_from(&overrides_path())
}

pub fn load_overrides_from(path: &std::path::Path) -> AliasOverrides {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        AliasOverrides::default()
    }
}

pub fn save_overrides(overrides: &AliasOverrides) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(overrides)
        .map_err(|e| CaravanError::Settings(e.to_string()))?;
    std::fs::write(overrides_path(), format!("{json}\n"))?;
    Ok(())
}

/// The process-wide alias tables: built-ins plus whatever the config file
/// adds. Loaded once at startup.
pub fn load_alias_book() -> AliasBook {
    alias_book_with(&load_overrides())
}

pub fn alias_book_with(overrides: &AliasOverrides) -> AliasBook {
    let mut book = AliasBook::new();
    for (code, synonyms) in &overrides.rooms {
        if let Some(kind) = RoomType::from_code(code) {
            book.add_room_synonyms(kind, synonyms);
        }
    }
    for (code, synonyms) in &overrides.meals {
        book.add_meal_synonyms(code, synonyms);
    }
    for (tag, synonyms) in &overrides.cities {
        book.add_city_synonyms(tag, synonyms);
    }
    for (tag, synonyms) in &overrides.packages {
        book.add_package_synonyms(tag, synonyms);
    }
    for (a, b) in &overrides.equivalent_packages {
        book.add_equivalence(a, b);
    }
    book.add_noise(&overrides.noise);
    book
}
