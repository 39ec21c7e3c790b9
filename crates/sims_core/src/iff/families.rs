use std::io;

use crate::model::Family;
use crate::reader::SliceReader;

const MAGIC: [u8; 4] = *b"IMAF";

/// Fixed fields through the member count.
const MIN_PAYLOAD_LEN: usize = 40;

/// Decode one family-definition payload. `chunk_id` is the chunk's container
/// id, later matched against the family-name string table sharing it.
///
/// A short payload or a magic mismatch decodes to nothing; the family name
/// stays empty here and is resolved by the orchestrator.
pub fn parse_family(payload: &[u8], chunk_id: u16) -> io::Result<Option<Family>> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Ok(None);
    }

    let mut r = SliceReader::new(payload);
    r.skip(4)?; // pad
    let _version = r.read_i32_le()?;
    if r.read_tag()? != MAGIC {
        return Ok(None);
    }

    let house_number = r.read_i32_le()?;
    let family_number = r.read_i32_le()?;
    let budget = r.read_i32_le()?;
    r.skip(12)?; // architecture value, family friends, flags

    let member_count = r.read_i32_le()?.max(0);
    let mut member_guids = Vec::new();
    for _ in 0..member_count {
        member_guids.push(r.read_u32_le()?);
    }

    Ok(Some(Family {
        chunk_id,
        family_number,
        name: String::new(),
        house_number,
        budget,
        member_guids,
    }))
}
