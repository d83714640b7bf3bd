//! Session state shared by the menus.
//!
//! [`Toolkit`] owns the loaded immigrants, the mentor registry and the
//! resource catalog together with the [`JsonStore`] they are persisted to.
//! Documents that do not exist yet are seeded with demo data unless seeding
//! is disabled; corrupt documents abort loading. A document with skipped
//! records is copied to a `.bak` file before anything can overwrite it.

use std::path::PathBuf;

use anyhow::Context;
use helper_core::{Immigrant, MentorRegistry, ResourceCatalog};
use helper_data::seed;
use helper_data::store::{IMMIGRANTS_FILE, MENTORS_FILE, RESOURCES_FILE};
use helper_data::{JsonStore, LoadOutcome};
use tracing::{debug, info, warn};

// ── ImmigrantDirectory ────────────────────────────────────────────────────────

/// Registered immigrants keyed by email, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ImmigrantDirectory {
    immigrants: Vec<Immigrant>,
}

impl ImmigrantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up by email, ignoring case.
    pub fn get(&self, email: &str) -> Option<&Immigrant> {
        let email = email.trim();
        self.immigrants.iter().find(|i| i.email().eq_ignore_ascii_case(email))
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut Immigrant> {
        let email = email.trim();
        self.immigrants.iter_mut().find(|i| i.email().eq_ignore_ascii_case(email))
    }

    /// Add `immigrant` unless the email is already taken. Returns `false` on
    /// a duplicate.
    pub fn insert(&mut self, immigrant: Immigrant) -> bool {
        if self.get(immigrant.email()).is_some() {
            return false;
        }
        self.immigrants.push(immigrant);
        true
    }

    pub fn len(&self) -> usize {
        self.immigrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.immigrants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Immigrant> {
        self.immigrants.iter()
    }
}

// ── LoadSummary ───────────────────────────────────────────────────────────────

/// What happened while loading, for the start-up banner.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Documents that were missing and filled with demo data.
    pub seeded: Vec<&'static str>,
    /// Records skipped because they were invalid or duplicated.
    pub skipped: usize,
    /// Copies of documents that had skipped records.
    pub backups: Vec<PathBuf>,
}

// ── Toolkit ───────────────────────────────────────────────────────────────────

/// Loaded documents plus the store they are saved back to.
#[derive(Debug)]
pub struct Toolkit {
    store: JsonStore,
    pub immigrants: ImmigrantDirectory,
    pub registry: MentorRegistry,
    pub catalog: ResourceCatalog,
}

impl Toolkit {
    /// Start with nothing loaded.
    pub fn empty(store: JsonStore) -> Self {
        Self {
            store,
            immigrants: ImmigrantDirectory::new(),
            registry: MentorRegistry::new(),
            catalog: ResourceCatalog::new(),
        }
    }

    /// Load all three documents from `store`.
    ///
    /// Missing mentor and resource documents are seeded with demo data when
    /// `seed_demo` is set and written back immediately.
    pub fn load(store: JsonStore, seed_demo: bool) -> anyhow::Result<(Self, LoadSummary)> {
        let mut summary = LoadSummary::default();
        let mut toolkit = Self::empty(store);

        // ── Immigrants ────────────────────────────────────────────────────────
        let before = summary.skipped;
        let outcome = toolkit
            .store
            .load_immigrants()
            .context("Could not load saved immigrants")?;
        for immigrant in take_records(outcome, IMMIGRANTS_FILE, &mut summary).unwrap_or_default() {
            let email = immigrant.email().to_string();
            if !toolkit.immigrants.insert(immigrant) {
                warn!("Skipping duplicate immigrant {}", email);
                summary.skipped += 1;
            }
        }
        toolkit.back_up_if_skipped(IMMIGRANTS_FILE, before, &mut summary)?;

        // ── Mentors ───────────────────────────────────────────────────────────
        let before = summary.skipped;
        let outcome = toolkit
            .store
            .load_mentors()
            .context("Could not load saved mentors")?;
        let mentors = match take_records(outcome, MENTORS_FILE, &mut summary) {
            Some(records) => records,
            None if seed_demo => {
                summary.seeded.push(MENTORS_FILE);
                seed::demo_mentors().context("Demo mentors are invalid")?
            }
            None => Vec::new(),
        };
        for mentor in mentors {
            if let Err(e) = toolkit.registry.register(mentor) {
                warn!("Skipping mentor: {}", e);
                summary.skipped += 1;
            }
        }
        toolkit.back_up_if_skipped(MENTORS_FILE, before, &mut summary)?;

        // ── Resources ─────────────────────────────────────────────────────────
        let before = summary.skipped;
        let outcome = toolkit
            .store
            .load_resources()
            .context("Could not load saved resources")?;
        let resources = match take_records(outcome, RESOURCES_FILE, &mut summary) {
            Some(records) => records,
            None if seed_demo => {
                summary.seeded.push(RESOURCES_FILE);
                seed::demo_resources().context("Demo resources are invalid")?
            }
            None => Vec::new(),
        };
        for resource in resources {
            if let Err(e) = toolkit.catalog.add(resource) {
                warn!("Skipping resource: {}", e);
                summary.skipped += 1;
            }
        }
        toolkit.back_up_if_skipped(RESOURCES_FILE, before, &mut summary)?;

        if summary.seeded.contains(&MENTORS_FILE) {
            toolkit.save_mentors().context("Could not save demo mentors")?;
        }
        if summary.seeded.contains(&RESOURCES_FILE) {
            toolkit.save_resources().context("Could not save demo resources")?;
        }

        info!(
            "Loaded {} immigrants, {} mentors, {} resources from {}",
            toolkit.immigrants.len(),
            toolkit.registry.len(),
            toolkit.catalog.len(),
            toolkit.store.dir().display()
        );
        Ok((toolkit, summary))
    }

    /// Saving drops whatever was skipped while loading `file`, so keep a copy
    /// of it first.
    fn back_up_if_skipped(&self, file: &str, before: usize, summary: &mut LoadSummary) -> anyhow::Result<()> {
        if summary.skipped == before {
            return Ok(());
        }
        if let Some(backup) = self
            .store
            .backup(file)
            .with_context(|| format!("Could not back up {}", file))?
        {
            summary.backups.push(backup);
        }
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    pub fn save_immigrants(&self) -> helper_data::Result<PathBuf> {
        self.store.save_immigrants(self.immigrants.iter())
    }

    pub fn save_mentors(&self) -> helper_data::Result<PathBuf> {
        self.store.save_mentors(self.registry.iter())
    }

    pub fn save_resources(&self) -> helper_data::Result<PathBuf> {
        self.store.save_resources(self.catalog.iter())
    }
}

/// Unwrap a load outcome, counting rejected records. `None` means the
/// document was missing.
fn take_records<T>(outcome: LoadOutcome<T>, file: &str, summary: &mut LoadSummary) -> Option<Vec<T>> {
    match outcome {
        LoadOutcome::Missing => {
            info!("{} does not exist yet", file);
            None
        }
        LoadOutcome::Loaded { records, rejected } => {
            debug!("{}: {} records, {} rejected", file, records.len(), rejected.len());
            summary.skipped += rejected.len();
            Some(records)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use helper_core::Expertise;
    use helper_core::Mentor;
    use tempfile::TempDir;

    fn immigrant(email: &str) -> Immigrant {
        Immigrant::new(
            "Ana Lopez",
            email,
            "spanish",
            "english",
            "San Jose",
            vec!["Career Guidance".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_directory_rejects_duplicate_email() {
        let mut directory = ImmigrantDirectory::new();
        assert!(directory.insert(immigrant("ana@example.com")));
        assert!(!directory.insert(immigrant("ANA@example.com")));
        assert_eq!(directory.len(), 1);
        assert!(directory.get("Ana@Example.com").is_some());
    }

    #[test]
    fn test_load_seeds_missing_documents() {
        let tmp = TempDir::new().unwrap();
        let (toolkit, summary) = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap();

        assert_eq!(summary.seeded, vec![MENTORS_FILE, RESOURCES_FILE]);
        assert_eq!(summary.skipped, 0);
        assert_eq!(toolkit.registry.len(), 11);
        assert_eq!(toolkit.catalog.len(), 24);
        assert!(toolkit.immigrants.is_empty());
        assert!(tmp.path().join(MENTORS_FILE).exists());
        assert!(tmp.path().join(RESOURCES_FILE).exists());
        assert!(!tmp.path().join(IMMIGRANTS_FILE).exists());
    }

    #[test]
    fn test_load_without_demo_data_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let (toolkit, summary) = Toolkit::load(JsonStore::new(tmp.path()), false).unwrap();

        assert!(summary.seeded.is_empty());
        assert!(toolkit.registry.is_empty());
        assert!(toolkit.catalog.is_empty());
        assert!(!tmp.path().join(MENTORS_FILE).exists());
    }

    #[test]
    fn test_load_reads_saved_state() {
        let tmp = TempDir::new().unwrap();
        let mut toolkit = Toolkit::empty(JsonStore::new(tmp.path()));
        toolkit.immigrants.insert(immigrant("ana@example.com"));
        toolkit
            .registry
            .register(
                Mentor::new(
                    "Priya Patel",
                    "priya@example.com",
                    Expertise::Career,
                    &["spanish".to_string()],
                    true,
                )
                .unwrap(),
            )
            .unwrap();
        toolkit.save_immigrants().unwrap();
        toolkit.save_mentors().unwrap();
        toolkit.save_resources().unwrap();

        let (loaded, summary) = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap();
        assert!(summary.seeded.is_empty(), "existing empty documents are not reseeded");
        assert_eq!(loaded.immigrants.len(), 1);
        assert_eq!(loaded.registry.len(), 1);
        assert!(loaded.catalog.is_empty());
    }

    #[test]
    fn test_load_counts_rejected_and_duplicate_records() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(MENTORS_FILE),
            r#"[
                {"name": "Juan Perez", "email": "juan@example.com", "expertise": ["career"],
                 "available_languages": ["spanish"], "availability": true},
                {"name": "Juan Again", "email": "JUAN@example.com", "expertise": ["legal"],
                 "available_languages": ["spanish"], "availability": true},
                {"name": "No Email", "expertise": ["legal"], "available_languages": ["spanish"]}
            ]"#,
        )
        .unwrap();

        let (toolkit, summary) = Toolkit::load(JsonStore::new(tmp.path()), false).unwrap();
        assert_eq!(toolkit.registry.len(), 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.backups, vec![tmp.path().join("mentors.json.bak")]);
    }

    #[test]
    fn test_load_nested_resources_then_save_keeps_them() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(RESOURCES_FILE),
            r#"{"san jose": {"health": ["Clinic A"], "legal": ["Aid B"]}, "cupertino": {"legal": ["Aid C"]}}"#,
        )
        .unwrap();

        let (mut toolkit, summary) = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap();
        assert!(!summary.seeded.contains(&RESOURCES_FILE));
        assert!(summary.backups.is_empty());
        assert_eq!(toolkit.catalog.len(), 3);

        toolkit
            .catalog
            .add(helper_core::Resource::new("Cupertino", "Food", "Pantry").unwrap())
            .unwrap();
        toolkit.save_resources().unwrap();

        let (reloaded, _) = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap();
        assert_eq!(reloaded.catalog.len(), 4);
        assert_eq!(reloaded.catalog.find_by_location_and_category("San Jose", "Health").len(), 1);
    }

    #[test]
    fn test_load_backs_up_document_with_skipped_records() {
        let tmp = TempDir::new().unwrap();
        let original = r#"[
            {"location": "San Jose", "category": "Health", "title": "Clinic"},
            {"location": "San Jose 95112", "category": "Health", "title": "Bad"}
        ]"#;
        std::fs::write(tmp.path().join(RESOURCES_FILE), original).unwrap();

        let (toolkit, summary) = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap();
        assert_eq!(summary.skipped, 1);
        let backup = tmp.path().join("resources.json.bak");
        assert_eq!(summary.backups, vec![backup.clone()]);

        toolkit.save_resources().unwrap();
        assert_eq!(std::fs::read_to_string(backup).unwrap(), original);
    }

    #[test]
    fn test_load_fails_on_corrupt_document() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(RESOURCES_FILE), "[{not json").unwrap();

        let err = Toolkit::load(JsonStore::new(tmp.path()), true).unwrap_err();
        assert!(format!("{:#}", err).contains(RESOURCES_FILE));
    }
}
