//! Roster chunk decoding.
//!
//! A roster payload holds one record per neighbor slot. Records are
//! variable-length and self-describing only in sequence: every field of a
//! record must be consumed, in order, to find the next record. The record
//! shape varies with a per-record version tag, and the trait block embedded
//! in each populated record carries personality, interests, age, gender and
//! family linkage at fixed index positions.

use std::collections::BTreeMap;
use std::io;

use crate::demographics::{Age, Gender};
use crate::model::{Interests, Personality, Relationship, Sim};
use crate::reader::{SliceReader, decode_ascii};

const MAGIC: [u8; 4] = *b"SRBN";

/// Per-record version marking the extended schema.
const EXTENDED_VERSION: i32 = 0xA;

/// Meaningful i16 prefix of the trait block. Records whose block holds fewer
/// entries are consumed for alignment but never produce a sim.
const TRAIT_VECTOR_LEN: usize = 88;

// Trait-vector index positions, fixed by the on-disk format.
const PD_NICE: usize = 2;
const PD_ACTIVE: usize = 3;
const PD_PLAYFUL: usize = 5;
const PD_OUTGOING: usize = 6;
const PD_NEAT: usize = 7;
const PD_AGE: usize = 58;
const PD_FAMILY_NUMBER: usize = 61;
const PD_GENDER: usize = 65;
const PD_ZODIAC: usize = 70;

/// Base-game topics, contiguous.
const PD_BASE_INTERESTS: [usize; 8] = [46, 47, 48, 49, 50, 51, 52, 53];
/// Expansion topics, scattered.
const PD_EXPANSION_INTERESTS: [usize; 7] = [13, 14, 16, 20, 26, 54, 55];

/// Group maxima at or below this are still on the coarse 0-10 scale.
const COARSE_SCALE_MAX: i16 = 10;

/// Record shape selected by the per-record version tag. Supporting another
/// version means adding a row to [`RECORD_SCHEMAS`], not another branch in
/// the parser.
#[derive(Debug, Clone, Copy)]
struct RecordSchema {
    /// Extra 4-byte header field between the version and the name.
    extension_marker: bool,
    /// Full trait-block size in bytes; the cursor always advances by this.
    trait_block_len: usize,
}

const RECORD_SCHEMAS: [(i32, RecordSchema); 1] = [(
    EXTENDED_VERSION,
    RecordSchema {
        extension_marker: true,
        trait_block_len: 0x200,
    },
)];

const DEFAULT_SCHEMA: RecordSchema = RecordSchema {
    extension_marker: false,
    trait_block_len: 0xA0,
};

impl RecordSchema {
    fn for_version(version: i32) -> Self {
        RECORD_SCHEMAS
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, schema)| *schema)
            .unwrap_or(DEFAULT_SCHEMA)
    }
}

/// Decode a roster payload into the populated sims it contains.
///
/// A payload whose embedded magic does not match decodes to nothing; that is
/// a structural mismatch, not an error. Truncation mid-record is an error.
pub fn parse_roster(payload: &[u8]) -> io::Result<Vec<Sim>> {
    let mut r = SliceReader::new(payload);

    r.skip(4)?; // pad
    let _version = r.read_i32_le()?;
    if r.read_tag()? != MAGIC {
        return Ok(Vec::new());
    }
    let record_count = r.read_i32_le()?.max(0);

    let mut sims = Vec::new();
    for _ in 0..record_count {
        if let Some(sim) = parse_record(&mut r)? {
            sims.push(sim);
        }
    }

    Ok(sims)
}

/// Decode one record, consuming its full byte span even when it yields
/// nothing, so the cursor stays aligned for the next record.
///
/// An empty slot (presence marker other than 1) is just its 4-byte marker;
/// scanning skips it and continues with the next record. The format gives no
/// way to size an empty slot, and deployed variants disagree on whether to
/// continue or stop here; this decoder continues.
fn parse_record(r: &mut SliceReader<'_>) -> io::Result<Option<Sim>> {
    if r.read_i32_le()? != 1 {
        return Ok(None);
    }

    let version = r.read_i32_le()?;
    let schema = RecordSchema::for_version(version);
    if schema.extension_marker {
        r.skip(4)?;
    }

    let name_bytes = r.read_cstring_bytes()?;
    let name = decode_ascii(name_bytes);
    // Even-length names carry one padding byte so the next field lands on an
    // even boundary relative to the record start.
    if name_bytes.len() % 2 == 0 {
        r.skip(1)?;
    }

    r.skip(4)?; // reserved, observed zero
    let trait_mode = r.read_i32_le()?;

    let mut person_data = Vec::new();
    if trait_mode > 0 {
        let meaningful = TRAIT_VECTOR_LEN.min(schema.trait_block_len / 2);
        person_data = r.read_i16_vec_le(meaningful)?;
        // The rest of the block is reserved padding; skip to its full size.
        r.skip(schema.trait_block_len - meaningful * 2)?;
    }

    let id = r.read_i16_le()?;
    let guid = r.read_u32_le()?;
    r.skip(4)?; // reserved, observed -1

    let relationships = parse_relationships(r)?;

    if trait_mode <= 0 || person_data.len() < TRAIT_VECTOR_LEN {
        return Ok(None);
    }

    Ok(Some(build_sim(id, guid, name, &person_data, relationships)))
}

fn parse_relationships(r: &mut SliceReader<'_>) -> io::Result<BTreeMap<i32, Relationship>> {
    let rel_count = r.read_i32_le()?.max(0);

    let mut relationships = BTreeMap::new();
    for _ in 0..rel_count {
        let key_count = r.read_i32_le()?.max(0);
        let mut target = None;
        for index in 0..key_count {
            let key = r.read_i32_le()?;
            // Only the first key names the target; the rest are consumed.
            if index == 0 {
                target = Some(key);
            }
        }

        let value_count = r.read_i32_le()?.max(0);
        let mut daily = 0;
        let mut is_friend = false;
        let mut lifetime = 0;
        for index in 0..value_count {
            let value = r.read_i32_le()?;
            match index {
                0 => daily = value,
                1 => is_friend = value != 0,
                2 => lifetime = value,
                _ => {} // consumed, positionally meaningless
            }
        }

        if let Some(target) = target {
            relationships.insert(
                target,
                Relationship {
                    daily,
                    is_friend,
                    lifetime,
                },
            );
        }
    }

    Ok(relationships)
}

fn build_sim(
    id: i16,
    guid: u32,
    name: String,
    person_data: &[i16],
    relationships: BTreeMap<i32, Relationship>,
) -> Sim {
    let personality = Personality {
        nice: person_data[PD_NICE],
        active: person_data[PD_ACTIVE],
        playful: person_data[PD_PLAYFUL],
        outgoing: person_data[PD_OUTGOING],
        neat: person_data[PD_NEAT],
    };

    Sim {
        id,
        guid,
        name,
        age: Age::from_raw(person_data[PD_AGE]),
        gender: Gender::from_raw(person_data[PD_GENDER]),
        family_id: i32::from(person_data[PD_FAMILY_NUMBER]),
        zodiac: person_data[PD_ZODIAC],
        personality,
        interests: extract_interests(person_data),
        relationships,
    }
}

/// Pull both topic groups out of the trait vector, normalizing each group
/// independently — a single record can mix the coarse and fine encodings.
fn extract_interests(person_data: &[i16]) -> Interests {
    let base = normalize_group(PD_BASE_INTERESTS.map(|i| person_data[i]));
    let expansion = normalize_group(PD_EXPANSION_INTERESTS.map(|i| person_data[i]));

    Interests {
        exercise: expansion[0],
        food: expansion[1],
        parties: expansion[2],
        style: expansion[3],
        hollywood: expansion[4],
        technology: expansion[5],
        romance: expansion[6],
        travel: base[0],
        violence: base[1],
        politics: base[2],
        sixties: base[3],
        weather: base[4],
        sports: base[5],
        music: base[6],
        outdoors: base[7],
    }
}

/// Scale a coarse-encoded group (maximum <= 10) onto the 0-1000 range.
///
/// Known false positive: a group whose fine-scale maximum is genuinely 10 is
/// indistinguishable from the coarse case and gets stretched as well. The
/// heuristic is kept as-is for compatibility with the format's history.
fn normalize_group<const N: usize>(mut values: [i16; N]) -> [i16; N] {
    let max = values.iter().copied().max().unwrap_or(0);
    if max <= COARSE_SCALE_MAX {
        for value in &mut values {
            *value = value.saturating_mul(100);
        }
    }
    values
}
