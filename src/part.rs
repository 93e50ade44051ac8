use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AvrError, AvrResult};

/// Memories whose contents are fixed by the silicon
const READONLY_MEMORIES: [&str; 4] = ["signature", "calibration", "sigrow", "prodsig"];

/// One addressable memory region of a part.
///
/// `num_pages` is derived when the descriptor is built: paged memories get
/// `ceil(size / page_size)` pages so a trailing partial page is still
/// addressable; unpaged memories report zero pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDescriptor {
    desc: String,
    size: usize,
    paged: bool,
    page_size: usize,
    num_pages: usize,
}

impl MemoryDescriptor {
    pub fn new(desc: &str, size: usize, paged: bool, page_size: usize) -> AvrResult<Self> {
        let num_pages = if paged {
            if page_size == 0 {
                return Err(AvrError::Configuration(format!(
                    "Memory {} is paged but has a page size of 0",
                    desc
                )));
            }
            size.div_ceil(page_size)
        } else {
            0
        };

        Ok(MemoryDescriptor {
            desc: desc.to_owned(),
            size,
            paged,
            page_size,
            num_pages,
        })
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn paged(&self) -> bool {
        self.paged
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn is_readonly(&self) -> bool {
        READONLY_MEMORIES.contains(&self.desc.as_str())
    }

    /// Largest unit the session moves in one driver call
    pub(crate) fn block_size(&self) -> usize {
        if self.paged { self.page_size } else { self.size.max(1) }
    }
}

/// A target device as described by the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDescriptor {
    pub(crate) id: String,
    pub(crate) desc: String,
    pub(crate) family_id: String,
    pub(crate) config_file: PathBuf,
    pub(crate) lineno: usize,
    pub(crate) signature: Option<[u8; 3]>,
    pub(crate) variants: Vec<String>,
    pub(crate) memories: Vec<MemoryDescriptor>,
}

impl PartDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn family_id(&self) -> &str {
        &self.family_id
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn lineno(&self) -> usize {
        self.lineno
    }

    pub fn signature(&self) -> Option<[u8; 3]> {
        self.signature
    }

    /// Memories in declaration order
    pub fn memories(&self) -> &[MemoryDescriptor] {
        &self.memories
    }

    /// Variant names in declaration order
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn locate_memory(&self, name: &str) -> Option<&MemoryDescriptor> {
        self.memories.iter().find(|m| m.desc == name)
    }

    pub fn overview(&self) -> PartOverview<'_> {
        PartOverview { part: self }
    }
}

/// Human readable summary of a part: provenance, memory table and variants
pub struct PartOverview<'a> {
    part: &'a PartDescriptor,
}

impl fmt::Display for PartOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = self.part;
        writeln!(
            f,
            "AVR part {} found as {}, or {}",
            part.id, part.desc, part.id
        )?;
        writeln!(
            f,
            "Definition in {}, line {}",
            part.config_file.display(),
            part.lineno
        )?;
        if let Some(sig) = part.signature {
            writeln!(f, "Signature {:02X} {:02X} {:02X}", sig[0], sig[1], sig[2])?;
        }

        writeln!(f)?;
        writeln!(f, "Memory overview:")?;
        writeln!(f, "Name        size   paged   page_size num_pages")?;
        for m in &part.memories {
            writeln!(
                f,
                "{:11} {:6}  {:5}   {:4}      {:3}",
                m.desc, m.size, m.paged, m.page_size, m.num_pages
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Device variants:")?;
        for variant in &part.variants {
            writeln!(f, "{}", variant)?;
        }

        Ok(())
    }
}
