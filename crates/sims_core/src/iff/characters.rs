//! Character-file scanning.
//!
//! Each file under the characters directory is a single-entity container.
//! The scan itself is a pure function over in-memory buffers; the directory
//! traversal is a thin shim on top so the parsing stays testable without a
//! filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::iff::{TAG_CHARACTER_NAMES, TAG_IMAGE, TAG_OBJECT_DEF, read_chunks};
use crate::iff::strings::parse_string_table;
use crate::model::CharacterInfo;

/// Files without this extension are not character containers.
const CHARACTER_FILE_EXT: &str = "iff";

/// Chunk id distinguishing the portrait role from other images of the same
/// type tag.
const PORTRAIT_CHUNK_ID: u16 = 2007;

/// Leading bytes of an accepted portrait payload.
const PORTRAIT_SIGNATURE: [u8; 2] = *b"BM";

/// Byte offset of the global identifier inside an object-definition payload.
const OBJD_GUID_OFFSET: usize = 28;

/// One character file read into memory. `name` is the bare file name, used
/// only for the extension filter.
#[derive(Debug, Clone)]
pub struct CharacterFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Build the global-identifier to character-info mapping from in-memory
/// character files.
///
/// A file contributes an entry only if it yields both a global identifier
/// and a non-empty display name; a missing portrait does not disqualify it.
/// Files that fail to decode contribute nothing and do not stop the scan.
pub fn scan_characters(files: &[CharacterFile]) -> BTreeMap<u32, CharacterInfo> {
    let mut characters = BTreeMap::new();

    for file in files {
        if !has_character_ext(&file.name) {
            continue;
        }
        if let Some((guid, info)) = scan_file(&file.bytes) {
            characters.insert(guid, info);
        }
    }

    characters
}

/// Directory shim over [`scan_characters`]: read every matching file under
/// `dir` (sorted by file name) into memory. A missing directory yields an
/// empty mapping.
pub fn scan_character_dir(dir: &Path) -> io::Result<BTreeMap<u32, CharacterInfo>> {
    if !dir.is_dir() {
        return Ok(BTreeMap::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !has_character_ext(&name) {
            continue;
        }
        let bytes = fs::read(entry.path())?;
        files.push(CharacterFile { name, bytes });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(scan_characters(&files))
}

fn has_character_ext(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CHARACTER_FILE_EXT))
}

/// Extract (global identifier, info) from a single file. The first usable
/// chunk of each type wins; later chunks of the same type are ignored.
fn scan_file(bytes: &[u8]) -> Option<(u32, CharacterInfo)> {
    let mut guid = None;
    let mut name: Option<String> = None;
    let mut portrait = None;

    for chunk in read_chunks(bytes) {
        match chunk.tag {
            TAG_OBJECT_DEF if guid.is_none() => {
                if chunk.payload.len() >= OBJD_GUID_OFFSET + 4 {
                    let b = &chunk.payload[OBJD_GUID_OFFSET..OBJD_GUID_OFFSET + 4];
                    guid = Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
                }
            }
            TAG_CHARACTER_NAMES if name.is_none() => {
                if let Ok(Some(value)) = parse_string_table(chunk.payload) {
                    name = Some(value);
                }
            }
            TAG_IMAGE if portrait.is_none() && chunk.id == PORTRAIT_CHUNK_ID => {
                if chunk.payload.starts_with(&PORTRAIT_SIGNATURE) {
                    portrait = Some(chunk.payload.to_vec());
                }
            }
            _ => {}
        }
    }

    let name = name.filter(|n| !n.is_empty())?;
    let guid = guid?;
    Some((guid, CharacterInfo { name, portrait }))
}
