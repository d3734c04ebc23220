//! Skill list filtering, enrichment, and the id → name lookup used by the
//! support-card scraper.

use crate::config::SKILL_ICON_BASE_URL;
use crate::model::{GradeSymbol, SkillRecord};
use foldhash::HashMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

/// Keeps entries that carry an integer `id` and a non-empty `name_en`.
///
/// When `enrich` is set, icon, description, rarity, color class and grade
/// symbol are filled in from the same raw entry.
pub fn filter_skills(raw: &[Value], enrich: bool) -> Vec<SkillRecord> {
    raw.iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(Value::as_i64)?;
            let name = entry
                .get("name_en")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())?;

            let mut record = SkillRecord::new(id, name);
            if enrich {
                enrich_skill(&mut record, entry);
            }
            Some(record)
        })
        .collect()
}

/// Adds display metadata from the raw skill entry.
pub fn enrich_skill(record: &mut SkillRecord, raw: &Value) {
    if let Some(icon_id) = raw.get("iconid").and_then(scalar_to_string) {
        let filename = format!("utx_ico_skill_{icon_id}.png");
        record.icon_src = Some(format!("{SKILL_ICON_BASE_URL}/{filename}"));
        record.icon_filename = Some(filename);
    }

    record.description = ["desc_en", "endesc"]
        .iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .find(|desc| !desc.is_empty())
        .map(str::to_string);

    record.rarity = raw.get("rarity").and_then(Value::as_i64);
    record.color_class = record
        .rarity
        .and_then(color_class)
        .map(str::to_string);
    record.grade_symbol = GradeSymbol::from_name(&record.name);
}

/// CSS-style color class the site uses for a skill rarity.
pub fn color_class(rarity: i64) -> Option<&'static str> {
    match rarity {
        1 => Some("normal"),
        2 => Some("gold"),
        3..=5 => Some("unique"),
        _ => None,
    }
}

/// Renders a JSON scalar the way it appears in ids: numbers and strings as-is.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Skill id → English name, keyed by the id's string form.
#[derive(Debug, Default)]
pub struct SkillLookup {
    names: HashMap<String, String>,
}

impl SkillLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lookup from an array of `{id, name_en}` objects.
    pub fn from_entries(entries: &[Value]) -> Self {
        let mut names: HashMap<String, String> = HashMap::default();
        for entry in entries {
            let Some(id) = entry.get("id").and_then(scalar_to_string) else {
                continue;
            };
            let Some(name) = entry
                .get("name_en")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
            else {
                continue;
            };
            names.insert(id, name.to_string());
        }
        Self { names }
    }

    /// Loads the skill scraper's output file.
    ///
    /// A missing or unreadable file is not fatal: skill ids simply stay
    /// untranslated.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "skill file not readable at {}: {e}; skill ids will not be translated",
                    path.display()
                );
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(entries) => {
                let lookup = Self::from_entries(&entries);
                debug!("loaded {} skills from {}", lookup.len(), path.display());
                lookup
            }
            Err(e) => {
                error!("failed to decode skill file {}: {e}", path.display());
                Self::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Resolves an id to its name, or a placeholder carrying the raw id.
    pub fn resolve(&self, id: &str) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Skill ID: {id}"))
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
