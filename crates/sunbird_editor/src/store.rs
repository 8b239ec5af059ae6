use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use inflector::Inflector;
use sunbird::prelude::*;

/// The narrow persistence contract the console edits against. The backing
/// document store is an external collaborator; nothing here assumes more
/// than these three calls.
pub trait ContentStore: Send + Sync + 'static {
    /// `None` covers a missing document and an unreachable store alike;
    /// the load path treats both the same way.
    fn fetch_section(&self, id: SectionId) -> Option<SectionContent>;

    /// `false` signals failure and aborts the remaining save sequence for
    /// that invocation.
    fn save_section(&self, id: SectionId, content: &SectionContent) -> bool;

    fn request_upload_target(&self, meta: &UploadMetadata) -> Option<UploadTarget>;
}

#[derive(Debug, Clone)]
pub struct UploadMetadata {
    pub file_name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub upload_path: PathBuf,
    pub public_url: String,
    pub key: String,
}

#[derive(Resource, Clone)]
pub struct StoreHandle(pub Arc<dyn ContentStore>);

/// Reference implementation: one RON document per section under the
/// content root, uploads copied into an `uploads/` subdirectory.
pub struct RonFileStore {
    root: PathBuf,
}

impl RonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn section_path(&self, id: SectionId) -> PathBuf {
        self.root.join(format!("{}.ron", id.slug()))
    }

    fn read_section(&self, id: SectionId) -> Result<SectionContent, StoreError> {
        let contents = std::fs::read_to_string(self.section_path(id))?;
        ron::from_str(&contents).map_err(|err| StoreError::Parse(err.to_string()))
    }

    fn write_section(&self, id: SectionId, content: &SectionContent) -> Result<(), StoreError> {
        let contents = ron::ser::to_string_pretty(content, ron::ser::PrettyConfig::default())
            .map_err(|err| StoreError::Serialize(err.to_string()))?;

        std::fs::create_dir_all(&self.root)?;
        let mut file = File::create(self.section_path(id))?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}

impl ContentStore for RonFileStore {
    fn fetch_section(&self, id: SectionId) -> Option<SectionContent> {
        self.read_section(id).ok()
    }

    fn save_section(&self, id: SectionId, content: &SectionContent) -> bool {
        self.write_section(id, content).is_ok()
    }

    fn request_upload_target(&self, meta: &UploadMetadata) -> Option<UploadTarget> {
        let key = meta.file_name.to_kebab_case();
        let uploads_dir = self.root.join("uploads");
        std::fs::create_dir_all(&uploads_dir).ok()?;

        Some(UploadTarget {
            upload_path: uploads_dir.join(&key),
            public_url: format!("/uploads/{key}"),
            key,
        })
    }
}

/// In-memory double for the integration suites, with per-section failure
/// injection so the save-abort path can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    sections: Mutex<HashMap<SectionId, SectionContent>>,
    failing_saves: Mutex<HashSet<SectionId>>,
}

impl MemoryStore {
    pub fn seed(&self, id: SectionId, content: SectionContent) {
        if let Ok(mut sections) = self.sections.lock() {
            sections.insert(id, content);
        }
    }

    pub fn fail_saves_for(&self, id: SectionId) {
        if let Ok(mut failing) = self.failing_saves.lock() {
            failing.insert(id);
        }
    }

    pub fn stored(&self, id: SectionId) -> Option<SectionContent> {
        self.sections.lock().ok()?.get(&id).cloned()
    }
}

impl ContentStore for MemoryStore {
    fn fetch_section(&self, id: SectionId) -> Option<SectionContent> {
        self.sections.lock().ok()?.get(&id).cloned()
    }

    fn save_section(&self, id: SectionId, content: &SectionContent) -> bool {
        if let Ok(failing) = self.failing_saves.lock() {
            if failing.contains(&id) {
                return false;
            }
        }

        let Ok(mut sections) = self.sections.lock() else {
            return false;
        };
        sections.insert(id, content.clone());
        true
    }

    fn request_upload_target(&self, meta: &UploadMetadata) -> Option<UploadTarget> {
        let key = meta.file_name.to_kebab_case();
        Some(UploadTarget {
            upload_path: std::env::temp_dir().join(&key),
            public_url: format!("/uploads/{key}"),
            key,
        })
    }
}
