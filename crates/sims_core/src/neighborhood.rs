//! Top-level orchestration: chunk dispatch, cross-referencing, and the
//! assembled [`Neighborhood`] snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CoreError, CoreErrorCode};
use crate::iff::characters::{CharacterFile, scan_character_dir, scan_characters};
use crate::iff::families::parse_family;
use crate::iff::neighbors::parse_roster;
use crate::iff::strings::parse_string_table;
use crate::iff::{TAG_FAMILY, TAG_FAMILY_NAMES, TAG_ROSTER, read_chunks};
use crate::model::{CharacterInfo, Family, Sim};

/// Well-known main container name under the UserData root.
pub const NEIGHBORHOOD_FILE: &str = "Neighborhood.iff";

/// Well-known subdirectory of per-character files.
pub const CHARACTERS_DIR: &str = "Characters";

/// Container id of the catch-all family holding non-playable townies. Sims
/// still homed there after orchestration have no real household.
pub const UNASSIGNED_FAMILY_ID: i32 = 0;

/// Fully decoded snapshot of one neighborhood.
///
/// Build a fresh snapshot and swap it in whole; a published snapshot is
/// never mutated, so concurrent readers can share it freely.
#[derive(Debug, Clone, Default)]
pub struct Neighborhood {
    pub sims: Vec<Sim>,
    pub families: Vec<Family>,
    pub characters: BTreeMap<u32, CharacterInfo>,
}

impl Neighborhood {
    /// Load and decode `Neighborhood.iff` plus the character files under the
    /// given UserData directory.
    pub fn load(userdata: &Path) -> Result<Self, CoreError> {
        let container_path = userdata.join(NEIGHBORHOOD_FILE);
        let data = fs::read(&container_path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", container_path.display()),
            )
        })?;

        let characters = scan_character_dir(&userdata.join(CHARACTERS_DIR)).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to scan character files: {e}"),
            )
        })?;

        let mut snapshot = Self::decode(&data).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to decode {}: {e}", container_path.display()),
            )
        })?;
        snapshot.join_characters(characters);
        Ok(snapshot)
    }

    /// Decode the main container plus already-read character file buffers.
    /// Pure over in-memory bytes; the filesystem shims live in [`Self::load`].
    pub fn from_buffers(data: &[u8], character_files: &[CharacterFile]) -> io::Result<Self> {
        let mut snapshot = Self::decode(data)?;
        snapshot.join_characters(scan_characters(character_files));
        Ok(snapshot)
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        let mut sims: Vec<Sim> = Vec::new();
        let mut families: Vec<Family> = Vec::new();
        let mut family_names: BTreeMap<u16, String> = BTreeMap::new();

        for chunk in read_chunks(data) {
            match chunk.tag {
                TAG_ROSTER => sims.extend(parse_roster(chunk.payload)?),
                TAG_FAMILY => {
                    if let Some(family) = parse_family(chunk.payload, chunk.id)? {
                        families.push(family);
                    }
                }
                TAG_FAMILY_NAMES => {
                    if let Some(name) = parse_string_table(chunk.payload)? {
                        if !name.is_empty() {
                            family_names.insert(chunk.id, name);
                        }
                    }
                }
                _ => {}
            }
        }

        // Family names arrive in separate string-table chunks sharing the
        // family chunk's container id.
        for family in &mut families {
            if let Some(name) = family_names.get(&family.chunk_id) {
                family.name = name.clone();
            }
        }

        // Re-home each sim to the family that lists its guid. Last writer
        // wins if a guid appears in more than one family; sims listed
        // nowhere keep their raw trait-vector value.
        let mut family_of_guid: BTreeMap<u32, u16> = BTreeMap::new();
        for family in &families {
            for &guid in &family.member_guids {
                family_of_guid.insert(guid, family.chunk_id);
            }
        }
        for sim in &mut sims {
            if let Some(&chunk_id) = family_of_guid.get(&sim.guid) {
                sim.family_id = i32::from(chunk_id);
            }
        }

        Ok(Self {
            sims,
            families,
            characters: BTreeMap::new(),
        })
    }

    /// Overwrite roster names with the display names found in character
    /// files; sims without a matching file keep their roster name.
    fn join_characters(&mut self, characters: BTreeMap<u32, CharacterInfo>) {
        for sim in &mut self.sims {
            if let Some(info) = characters.get(&sim.guid) {
                sim.name = info.name.clone();
            }
        }
        self.characters = characters;
    }

    pub fn sim_by_id(&self, id: i16) -> Option<&Sim> {
        self.sims.iter().find(|sim| sim.id == id)
    }

    /// Portrait bytes keyed by local sim id, the address the service layer
    /// serves them under.
    pub fn portraits_by_sim_id(&self) -> BTreeMap<i16, Vec<u8>> {
        let mut portraits = BTreeMap::new();
        for sim in &self.sims {
            if let Some(info) = self.characters.get(&sim.guid) {
                if let Some(portrait) = &info.portrait {
                    portraits.insert(sim.id, portrait.clone());
                }
            }
        }
        portraits
    }
}
