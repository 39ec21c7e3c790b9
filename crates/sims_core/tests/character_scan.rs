mod common;

use common::{
    ContainerBuilder, NeighborRecord, PD_AGE, RosterBuilder, bmp_payload, objd_payload,
    string_table_payload,
};
use sims_core::iff::characters::{CharacterFile, scan_characters};
use sims_core::neighborhood::Neighborhood;

fn character_file(name: &str, data: Vec<u8>) -> CharacterFile {
    CharacterFile {
        name: name.to_string(),
        bytes: data,
    }
}

fn full_character(guid: u32, display_name: &str) -> Vec<u8> {
    ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(guid))
        .chunk(b"CTSS", 2000, &string_table_payload(-3, display_name, ""))
        .chunk(b"BMP_", 2007, &bmp_payload())
        .build()
}

#[test]
fn complete_file_yields_name_and_portrait() {
    let files = [character_file("User00000.iff", full_character(0xBEEF, "Bella Goth"))];

    let characters = scan_characters(&files);
    let info = characters.get(&0xBEEF).expect("missing character");
    assert_eq!(info.name, "Bella Goth");
    let portrait = info.portrait.as_ref().expect("missing portrait");
    assert!(portrait.starts_with(b"BM"));
}

#[test]
fn missing_portrait_is_not_disqualifying() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x10))
        .chunk(b"CTSS", 2000, &string_table_payload(-3, "Mortimer", ""))
        .build();
    let files = [character_file("User00001.iff", data)];

    let characters = scan_characters(&files);
    let info = characters.get(&0x10).expect("missing character");
    assert_eq!(info.name, "Mortimer");
    assert!(info.portrait.is_none());
}

#[test]
fn file_without_object_definition_is_excluded() {
    let data = ContainerBuilder::new()
        .chunk(b"CTSS", 2000, &string_table_payload(-3, "Nameless", ""))
        .chunk(b"BMP_", 2007, &bmp_payload())
        .build();
    let files = [character_file("User00002.iff", data)];

    assert!(scan_characters(&files).is_empty());
}

#[test]
fn file_without_name_table_is_excluded() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x20))
        .chunk(b"BMP_", 2007, &bmp_payload())
        .build();
    let files = [character_file("User00003.iff", data)];

    assert!(scan_characters(&files).is_empty());
}

#[test]
fn wrong_extension_is_skipped() {
    let files = [character_file("notes.txt", full_character(0x30, "Skipped"))];
    assert!(scan_characters(&files).is_empty());
}

#[test]
fn extension_match_is_case_insensitive() {
    let files = [character_file("USER00004.IFF", full_character(0x40, "Upper"))];
    assert_eq!(scan_characters(&files).len(), 1);
}

#[test]
fn image_with_wrong_signature_is_rejected() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x50))
        .chunk(b"CTSS", 2000, &string_table_payload(-3, "NoPic", ""))
        .chunk(b"BMP_", 2007, b"XX123456")
        .build();
    let files = [character_file("User00005.iff", data)];

    let characters = scan_characters(&files);
    assert!(characters[&0x50].portrait.is_none());
}

#[test]
fn image_with_other_chunk_id_is_not_the_portrait() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x60))
        .chunk(b"CTSS", 2000, &string_table_payload(-3, "OtherPic", ""))
        .chunk(b"BMP_", 1999, &bmp_payload())
        .build();
    let files = [character_file("User00006.iff", data)];

    let characters = scan_characters(&files);
    assert!(characters[&0x60].portrait.is_none());
}

#[test]
fn first_name_table_wins() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x70))
        .chunk(b"CTSS", 2000, &string_table_payload(-3, "First", ""))
        .chunk(b"CTSS", 2001, &string_table_payload(-3, "Second", ""))
        .build();
    let files = [character_file("User00007.iff", data)];

    let characters = scan_characters(&files);
    assert_eq!(characters[&0x70].name, "First");
}

#[test]
fn unsupported_name_table_format_excludes_the_file() {
    let data = ContainerBuilder::new()
        .chunk(b"OBJD", 128, &objd_payload(0x80))
        .chunk(b"CTSS", 2000, &string_table_payload(5, "WrongFormat", ""))
        .build();
    let files = [character_file("User00008.iff", data)];

    assert!(scan_characters(&files).is_empty());
}

#[test]
fn scanned_name_overwrites_roster_name() {
    let roster = RosterBuilder::new()
        .neighbor(&NeighborRecord::new("roster name", 4, 0x90).with_pd(PD_AGE, 30))
        .build();
    let data = ContainerBuilder::new().chunk(b"NBRS", 0, &roster).build();
    let files = [character_file("User00009.iff", full_character(0x90, "Display Name"))];

    let neighborhood = Neighborhood::from_buffers(&data, &files).expect("decode failed");
    assert_eq!(neighborhood.sims[0].name, "Display Name");

    // Portraits are re-keyed by local sim id for the consuming API.
    let portraits = neighborhood.portraits_by_sim_id();
    assert!(portraits.contains_key(&4));
}

#[test]
fn unmatched_guid_keeps_roster_name() {
    let roster = RosterBuilder::new()
        .neighbor(&NeighborRecord::new("townie", 5, 0xA0).with_pd(PD_AGE, 30))
        .build();
    let data = ContainerBuilder::new().chunk(b"NBRS", 0, &roster).build();
    let files = [character_file("User00010.iff", full_character(0xFFFF, "Stranger"))];

    let neighborhood = Neighborhood::from_buffers(&data, &files).expect("decode failed");
    assert_eq!(neighborhood.sims[0].name, "townie");
}
