//! Category Resolver - category label → canonical id
//!
//! Admin routes and external feeds frequently name a category instead
//! of referencing its id ("cpu", "Graphics Cards", a short code from a
//! spreadsheet column). All of that heuristic matching lives here, in
//! one place, so the import engine and the query layer resolve labels
//! identically.
//!
//! Resolution order:
//! 1. exact case-insensitive match against known category names
//! 2. case-insensitive substring match (label within a name)
//! 3. fixed alias table (canonical label → id)
//! 4. configured fallback id

use shared::models::Category;

/// Standard storefront taxonomy aliases (label → category id)
const DEFAULT_TAXONOMY: &[(&str, i64)] = &[
    ("cpu", 1),
    ("processor", 1),
    ("processors", 1),
    ("ram", 2),
    ("memory", 2),
    ("gpu", 3),
    ("graphics card", 3),
    ("graphics cards", 3),
    ("video card", 3),
    ("motherboard", 4),
    ("motherboards", 4),
    ("mainboard", 4),
    ("storage", 5),
    ("ssd", 5),
    ("hdd", 5),
    ("hard drive", 5),
    ("psu", 6),
    ("power supply", 6),
    ("case", 7),
    ("chassis", 7),
    ("cooling", 8),
    ("cooler", 8),
];

#[derive(Debug, Clone)]
pub struct CategoryResolver {
    /// Alias table, keys lowercased
    aliases: Vec<(String, i64)>,
    /// Returned when nothing matches
    default_id: i64,
}

impl CategoryResolver {
    pub fn new(aliases: &[(&str, i64)], default_id: i64) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|(label, id)| (label.to_lowercase(), *id))
                .collect(),
            default_id,
        }
    }

    /// Resolver seeded with the standard storefront taxonomy
    pub fn with_default_taxonomy(default_id: i64) -> Self {
        Self::new(DEFAULT_TAXONOMY, default_id)
    }

    pub fn default_id(&self) -> i64 {
        self.default_id
    }

    /// Resolve a label against the known categories, falling back to
    /// the alias table and finally the configured default id.
    pub fn resolve(&self, label: &str, categories: &[Category]) -> i64 {
        self.try_resolve(label, categories)
            .unwrap_or(self.default_id)
    }

    /// Like [`resolve`](Self::resolve), but `None` instead of the
    /// fallback id when nothing matches.
    pub fn try_resolve(&self, label: &str, categories: &[Category]) -> Option<i64> {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(c) = categories.iter().find(|c| c.name.to_lowercase() == needle) {
            return Some(c.id);
        }
        if let Some(c) = categories
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
        {
            return Some(c.id);
        }
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, id)| *id)
    }
}
