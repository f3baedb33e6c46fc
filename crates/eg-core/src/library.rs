use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::party::Party;
use crate::template::{Template, TemplateId};

/// Read-only access to templates, plus the one write the generator may
/// request: recording that a template was used.
pub trait TemplateSource {
    /// Look up a template by id.
    fn template(&self, id: TemplateId) -> Option<&Template>;

    /// Record one batch of `generated` instances of a template. Called at
    /// most once per batch; implementations must apply it atomically.
    fn record_usage(&self, _id: TemplateId, _generated: u64) {}
}

/// Usage counters of one template at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UsageSnapshot {
    /// Number of batches generated.
    pub used: u64,
    /// Number of instances generated across all batches.
    pub generated: u64,
}

#[derive(Debug, Default)]
struct UsageCounters {
    used: AtomicU64,
    generated: AtomicU64,
}

/// On-disk shape of a library file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    templates: Vec<Template>,
    #[serde(default)]
    parties: Vec<Party>,
}

/// An in-memory collection of templates and parties.
///
/// Templates are immutable once added; usage counters are atomics so the
/// library can be shared across threads generating in parallel.
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    templates: HashMap<TemplateId, Template>,
    parties: Vec<Party>,
    usage: HashMap<TemplateId, UsageCounters>,

    // Indexes
    by_name_lower: HashMap<String, TemplateId>,
}

impl TemplateLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a library from a JSON document with `templates` and `parties`
    /// arrays.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let file: LibraryFile = serde_json::from_str(json)?;
        let mut library = Self::new();
        for template in file.templates {
            library.add_template(template)?;
        }
        for party in file.parties {
            library.add_party(party);
        }
        Ok(library)
    }

    /// Load a library from a JSON file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the library back to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        let file = LibraryFile {
            templates: self.templates().cloned().collect(),
            parties: self.parties.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// Add a template. Ids and names (case-insensitive) must be unique.
    pub fn add_template(&mut self, template: Template) -> CoreResult<TemplateId> {
        let id = template.id;
        if self.templates.contains_key(&id) {
            return Err(CoreError::DuplicateId(id));
        }
        let name_lower = template.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(CoreError::DuplicateName(template.name));
        }
        self.by_name_lower.insert(name_lower, id);
        self.usage.insert(id, UsageCounters::default());
        self.templates.insert(id, template);
        Ok(id)
    }

    /// Get a template by id.
    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(&id)
    }

    /// Find a template by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|id| self.templates.get(id))
    }

    /// Resolve a template by name, or by numeric id (`"12"` or `"#12"`).
    pub fn resolve(&self, key: &str) -> CoreResult<&Template> {
        if let Some(template) = self.find_by_name(key) {
            return Ok(template);
        }
        key.trim_start_matches('#')
            .parse::<u32>()
            .ok()
            .and_then(|n| self.get(TemplateId(n)))
            .ok_or_else(|| CoreError::TemplateNotFound(key.to_string()))
    }

    /// All templates, sorted by name.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        let mut all: Vec<&Template> = self.templates.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all.into_iter()
    }

    /// Number of stored templates.
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    // -----------------------------------------------------------------------
    // Parties
    // -----------------------------------------------------------------------

    /// Store a party.
    pub fn add_party(&mut self, party: Party) {
        self.parties.push(party);
    }

    /// Find a party by name (case-insensitive).
    pub fn find_party(&self, name: &str) -> CoreResult<&Party> {
        self.parties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::PartyNotFound(name.to_string()))
    }

    /// All parties, in stored order.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    // -----------------------------------------------------------------------
    // Usage
    // -----------------------------------------------------------------------

    /// Current usage counters of a template (zero for unknown ids).
    pub fn usage(&self, id: TemplateId) -> UsageSnapshot {
        self.usage
            .get(&id)
            .map(|c| UsageSnapshot {
                used: c.used.load(Ordering::Relaxed),
                generated: c.generated.load(Ordering::Relaxed),
            })
            .unwrap_or_default()
    }
}

impl TemplateSource for TemplateLibrary {
    fn template(&self, id: TemplateId) -> Option<&Template> {
        self.get(id)
    }

    fn record_usage(&self, id: TemplateId, generated: u64) {
        if let Some(counters) = self.usage.get(&id) {
            counters.used.fetch_add(1, Ordering::Relaxed);
            counters.generated.fetch_add(generated, Ordering::Relaxed);
        }
    }
}
