use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::parse_catalog;
use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, SYSTEM_CONFIG_DIRS};
use crate::error::{AvrError, AvrResult};
use crate::part::PartDescriptor;
use crate::programmer::ProgrammerDescriptor;

/// Parts and programmers known to this process, immutable once loaded
#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    parts: Vec<PartDescriptor>,
    programmers: Vec<ProgrammerDescriptor>,
}

impl Catalog {
    /// Load from the first candidate that can be read and parsed.
    /// Candidates that are missing or invalid are skipped.
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> AvrResult<Self> {
        let mut tried = Vec::with_capacity(sources.len());

        for source in sources {
            let path = source.as_ref();
            tried.push(path.to_path_buf());

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Skipping config candidate {}: {}", path.display(), e);
                    continue;
                }
            };

            match Self::parse(&content, path) {
                Ok(catalog) => {
                    info!(
                        "Loaded {} parts and {} programmers from {}",
                        catalog.parts.len(),
                        catalog.programmers.len(),
                        path.display()
                    );
                    return Ok(catalog);
                }
                Err(e) => warn!("Ignoring config candidate {}: {}", path.display(), e),
            }
        }

        Err(AvrError::ConfigNotFound { tried })
    }

    /// Build a catalog from configuration text; `origin` is recorded as the
    /// definition file of every entry
    pub fn parse(content: &str, origin: &Path) -> AvrResult<Self> {
        let (parts, programmers) = parse_catalog(content, origin)?;
        Ok(Catalog {
            source: origin.to_path_buf(),
            parts,
            programmers,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn parts(&self) -> &[PartDescriptor] {
        &self.parts
    }

    pub fn programmers(&self) -> &[ProgrammerDescriptor] {
        &self.programmers
    }

    pub fn locate_part(&self, id: &str) -> Option<&PartDescriptor> {
        self.parts.iter().find(|p| p.id() == id)
    }

    pub fn locate_programmer(&self, id: &str) -> Option<&ProgrammerDescriptor> {
        self.programmers.iter().find(|p| p.id() == id)
    }

    pub fn require_part(&self, id: &str) -> AvrResult<&PartDescriptor> {
        self.locate_part(id).ok_or_else(|| AvrError::LookupMiss {
            kind: "part",
            id: id.to_owned(),
        })
    }

    pub fn require_programmer(&self, id: &str) -> AvrResult<&ProgrammerDescriptor> {
        self.locate_programmer(id)
            .ok_or_else(|| AvrError::LookupMiss {
                kind: "programmer",
                id: id.to_owned(),
            })
    }
}

/// Candidate configuration files in search order: explicit paths first,
/// then the environment override, the working directory and the system dirs
pub fn config_search_path(explicit: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates = explicit.to_vec();

    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(path));
    }

    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    for dir in SYSTEM_CONFIG_DIRS {
        candidates.push(Path::new(dir).join(CONFIG_FILE_NAME));
    }

    candidates
}
