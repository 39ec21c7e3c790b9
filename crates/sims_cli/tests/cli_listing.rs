use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sims-compat"))
        .args(args)
        .output()
        .expect("failed to run sims-compat CLI")
}

fn temp_userdata() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("sims_compat_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(dir.join("Characters")).expect("failed to create fixture dirs");
    dir
}

// --- minimal container fixture ---------------------------------------------

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], id: u16, payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&((76 + payload.len()) as u32).to_be_bytes());
    out.extend_from_slice(&id.to_be_bytes());
    out.extend_from_slice(&[0u8; 2]);
    out.extend_from_slice(&[0u8; 64]);
    out.extend_from_slice(payload);
}

fn roster_payload(name: &str, id: i16, guid: u32) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0u8; 4]); // pad
    p.extend_from_slice(&1i32.to_le_bytes()); // chunk version
    p.extend_from_slice(b"SRBN");
    p.extend_from_slice(&1i32.to_le_bytes()); // record count

    p.extend_from_slice(&1i32.to_le_bytes()); // populated slot
    p.extend_from_slice(&0xA_i32.to_le_bytes()); // extended version
    p.extend_from_slice(&0i32.to_le_bytes()); // extension marker
    p.extend_from_slice(name.as_bytes());
    p.push(0);
    if name.len() % 2 == 0 {
        p.push(0);
    }
    p.extend_from_slice(&0i32.to_le_bytes()); // reserved
    p.extend_from_slice(&1i32.to_le_bytes()); // trait mode

    let mut person_data = [0i16; 88];
    person_data[58] = 30; // adult
    person_data[65] = 1; // female
    let mut block = Vec::with_capacity(0x200);
    for value in person_data {
        block.extend_from_slice(&value.to_le_bytes());
    }
    block.resize(0x200, 0);
    p.extend_from_slice(&block);

    p.extend_from_slice(&id.to_le_bytes());
    p.extend_from_slice(&guid.to_le_bytes());
    p.extend_from_slice(&(-1i32).to_le_bytes()); // reserved
    p.extend_from_slice(&0i32.to_le_bytes()); // relationship count
    p
}

fn family_payload(member_guid: u32) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0u8; 4]);
    p.extend_from_slice(&1i32.to_le_bytes());
    p.extend_from_slice(b"IMAF");
    p.extend_from_slice(&4i32.to_le_bytes()); // house number
    p.extend_from_slice(&2i32.to_le_bytes()); // family number
    p.extend_from_slice(&20_000i32.to_le_bytes()); // budget
    p.extend_from_slice(&[0u8; 12]);
    p.extend_from_slice(&1i32.to_le_bytes());
    p.extend_from_slice(&member_guid.to_le_bytes());
    p
}

fn name_table_payload(value: &str) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&(-3i16).to_le_bytes());
    p.extend_from_slice(&1u16.to_le_bytes());
    p.push(0); // language code
    p.extend_from_slice(value.as_bytes());
    p.push(0);
    p.push(0); // empty comment
    p
}

fn write_fixture(userdata: &PathBuf) {
    let mut data = vec![0u8; 64];
    push_chunk(&mut data, b"NBRS", 0, &roster_payload("bella", 1, 0x1234));
    push_chunk(&mut data, b"FAMI", 5, &family_payload(0x1234));
    push_chunk(&mut data, b"FAMs", 5, &name_table_payload("Goth"));
    fs::write(userdata.join("Neighborhood.iff"), data).expect("failed to write fixture");
}

// --- tests ------------------------------------------------------------------

#[test]
fn cli_sims_json_resolves_family_name() {
    let userdata = temp_userdata();
    write_fixture(&userdata);

    let output = run_cli(&[
        "--userdata",
        &userdata.to_string_lossy(),
        "--sims",
        "--json",
    ]);
    assert!(output.status.success());

    let json: Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    let sims = json["sims"].as_array().expect("missing sims array");
    assert_eq!(sims.len(), 1);
    assert_eq!(sims[0]["name"], "bella");
    assert_eq!(sims[0]["guid"], "0x00001234");
    assert_eq!(sims[0]["family_name"], "Goth");
    assert_eq!(sims[0]["family_id"], 5);
    assert_eq!(sims[0]["gender"], "female");

    fs::remove_dir_all(&userdata).ok();
}

#[test]
fn cli_text_listing_is_the_default() {
    let userdata = temp_userdata();
    write_fixture(&userdata);

    let output = run_cli(&["--userdata", &userdata.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bella"));
    assert!(stdout.contains("Goth"));

    fs::remove_dir_all(&userdata).ok();
}

#[test]
fn cli_unknown_compat_sim_fails() {
    let userdata = temp_userdata();
    write_fixture(&userdata);

    let output = run_cli(&[
        "--userdata",
        &userdata.to_string_lossy(),
        "--compat",
        "99",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));

    fs::remove_dir_all(&userdata).ok();
}

#[test]
fn cli_missing_userdata_fails() {
    let output = run_cli(&["--userdata", "/nonexistent/sims_compat_fixture"]);
    assert!(!output.status.success());
}
