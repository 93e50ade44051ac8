use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use toml::Spanned;
use tracing::debug;

use crate::error::{AvrError, AvrResult};
use crate::part::{MemoryDescriptor, PartDescriptor};
use crate::programmer::{ProgrammerDescriptor, TransportKind};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    programmer: Vec<ProgrammerDef>,
    #[serde(default)]
    part: Vec<PartDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProgrammerDef {
    id: Spanned<String>,
    #[serde(default)]
    desc: String,
    #[serde(rename = "type")]
    transport: TransportKind,
    protocol: String,
    baudrate: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartDef {
    id: Spanned<String>,
    #[serde(default)]
    desc: String,
    family_id: Option<String>,
    parent: Option<String>,
    signature: Option<Vec<u8>>,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    memory: Vec<MemoryDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemoryDef {
    name: String,
    size: usize,
    #[serde(default)]
    paged: bool,
    #[serde(default)]
    page_size: usize,
}

/// 1-based line number of a byte offset
fn line_of(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .unwrap_or(content)
        .matches('\n')
        .count()
        + 1
}

fn config_error(origin: &Path, lineno: usize, msg: String) -> AvrError {
    AvrError::Configuration(format!("{}:{}: {}", origin.display(), lineno, msg))
}

/// Parse one configuration source into part and programmer descriptors.
/// Any invalid entry rejects the whole source.
pub(crate) fn parse_catalog(
    content: &str,
    origin: &Path,
) -> AvrResult<(Vec<PartDescriptor>, Vec<ProgrammerDescriptor>)> {
    let file: ConfigFile = toml::from_str(content).map_err(|e| {
        AvrError::Configuration(format!("{}: {}", origin.display(), e))
    })?;

    let mut programmers: Vec<ProgrammerDescriptor> = Vec::with_capacity(file.programmer.len());
    for def in file.programmer {
        let lineno = line_of(content, def.id.span().start);
        let id = def.id.into_inner();
        if programmers.iter().any(|p| p.id == id) {
            return Err(config_error(
                origin,
                lineno,
                format!("duplicate programmer id {:?}", id),
            ));
        }

        programmers.push(ProgrammerDescriptor {
            id,
            desc: def.desc,
            transport: def.transport,
            protocol: def.protocol,
            baudrate: def.baudrate,
            config_file: origin.to_path_buf(),
            lineno,
        });
    }

    let mut parts: Vec<PartDescriptor> = Vec::with_capacity(file.part.len());
    for def in file.part {
        let lineno = line_of(content, def.id.span().start);
        let part = build_part(def, &parts, origin, lineno)?;
        if parts.iter().any(|p| p.id == part.id) {
            return Err(config_error(
                origin,
                lineno,
                format!("duplicate part id {:?}", part.id),
            ));
        }
        debug!("Parsed part {} with {} memories", part.id, part.memories.len());
        parts.push(part);
    }

    Ok((parts, programmers))
}

fn build_part(
    def: PartDef,
    known: &[PartDescriptor],
    origin: &Path,
    lineno: usize,
) -> AvrResult<PartDescriptor> {
    let id = def.id.into_inner();

    let parent = match &def.parent {
        Some(name) => Some(known.iter().find(|p| &p.id == name).ok_or_else(|| {
            config_error(
                origin,
                lineno,
                format!("part {} names unknown parent {:?}", id, name),
            )
        })?),
        None => None,
    };

    let signature = match def.signature {
        Some(bytes) => Some(<[u8; 3]>::try_from(bytes.as_slice()).map_err(|_| {
            config_error(
                origin,
                lineno,
                format!(
                    "part {} has a {} byte signature, expected 3",
                    id,
                    bytes.len()
                ),
            )
        })?),
        None => parent.and_then(|p| p.signature),
    };

    let mut memories: Vec<MemoryDescriptor> =
        parent.map(|p| p.memories.clone()).unwrap_or_default();
    let mut declared = HashSet::new();
    for mem in def.memory {
        if !declared.insert(mem.name.clone()) {
            return Err(config_error(
                origin,
                lineno,
                format!("part {} declares memory {} twice", id, mem.name),
            ));
        }

        let descriptor = MemoryDescriptor::new(&mem.name, mem.size, mem.paged, mem.page_size)
            .map_err(|e| config_error(origin, lineno, format!("part {}: {}", id, e)))?;

        match memories.iter_mut().find(|m| m.desc() == mem.name) {
            Some(inherited) => *inherited = descriptor,
            None => memories.push(descriptor),
        }
    }

    let family_id = def
        .family_id
        .or_else(|| parent.map(|p| p.family_id.clone()))
        .unwrap_or_default();

    Ok(PartDescriptor {
        id,
        desc: def.desc,
        family_id,
        config_file: origin.to_path_buf(),
        lineno,
        signature,
        variants: def.variants,
        memories,
    })
}
