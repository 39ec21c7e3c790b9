//! Shared JSON and text rendering over decoded neighborhood data, used by
//! both the CLI and the HTTP service so the two surfaces stay consistent.

use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use sims_core::compatibility::Compatibility;
use sims_core::{Family, Interests, Personality, Sim};

/// Global identifiers display as fixed-width uppercase hexadecimal.
pub fn format_guid(guid: u32) -> String {
    format!("0x{guid:08X}")
}

/// Find the family whose container id a sim was re-homed to, if any.
pub fn family_of<'a>(families: &'a [Family], sim: &Sim) -> Option<&'a Family> {
    let chunk_id = u16::try_from(sim.family_id).ok()?;
    families.iter().find(|family| family.chunk_id == chunk_id)
}

pub fn sim_to_json(sim: &Sim, family: Option<&Family>) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("id".to_string(), JsonValue::from(sim.id));
    m.insert("guid".to_string(), JsonValue::String(format_guid(sim.guid)));
    m.insert("name".to_string(), JsonValue::String(sim.name.clone()));
    m.insert(
        "family_name".to_string(),
        JsonValue::String(family.map(|f| f.name.clone()).unwrap_or_default()),
    );
    m.insert("family_id".to_string(), JsonValue::from(sim.family_id));
    m.insert(
        "house_number".to_string(),
        JsonValue::from(family.map(|f| f.house_number).unwrap_or(0)),
    );
    m.insert("age".to_string(), JsonValue::String(sim.age.to_string()));
    m.insert(
        "gender".to_string(),
        JsonValue::String(sim.gender.to_string()),
    );
    m.insert(
        "personality".to_string(),
        personality_to_json(&sim.personality),
    );
    m.insert("interests".to_string(), interests_to_json(&sim.interests));
    JsonValue::Object(m)
}

fn personality_to_json(personality: &Personality) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("nice".to_string(), JsonValue::from(personality.nice));
    m.insert("active".to_string(), JsonValue::from(personality.active));
    m.insert("playful".to_string(), JsonValue::from(personality.playful));
    m.insert("outgoing".to_string(), JsonValue::from(personality.outgoing));
    m.insert("neat".to_string(), JsonValue::from(personality.neat));
    JsonValue::Object(m)
}

/// The sim payload carries the contiguous base-game topic group; the full
/// fifteen-topic set surfaces through compatibility results instead.
fn interests_to_json(interests: &Interests) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("travel".to_string(), JsonValue::from(interests.travel));
    m.insert("violence".to_string(), JsonValue::from(interests.violence));
    m.insert("politics".to_string(), JsonValue::from(interests.politics));
    m.insert("sixties".to_string(), JsonValue::from(interests.sixties));
    m.insert("weather".to_string(), JsonValue::from(interests.weather));
    m.insert("sports".to_string(), JsonValue::from(interests.sports));
    m.insert("music".to_string(), JsonValue::from(interests.music));
    m.insert("outdoors".to_string(), JsonValue::from(interests.outdoors));
    JsonValue::Object(m)
}

pub fn family_to_json(family: &Family) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("id".to_string(), JsonValue::from(family.chunk_id));
    m.insert("name".to_string(), JsonValue::String(family.name.clone()));
    m.insert(
        "house_number".to_string(),
        JsonValue::from(family.house_number),
    );
    m.insert("budget".to_string(), JsonValue::from(family.budget));
    m.insert(
        "member_guids".to_string(),
        JsonValue::Array(
            family
                .member_guids
                .iter()
                .map(|&guid| JsonValue::String(format_guid(guid)))
                .collect(),
        ),
    );
    JsonValue::Object(m)
}

/// One ranking entry. `sim` is the already-rendered candidate sim.
pub fn compatibility_to_json(compat: &Compatibility, sim: JsonValue) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("sim".to_string(), sim);
    m.insert("score".to_string(), JsonValue::from(compat.score));
    m.insert(
        "common_interests".to_string(),
        str_array(&compat.common_interests),
    );
    m.insert("risky_topics".to_string(), str_array(&compat.risky_topics));
    m.insert(
        "relationship_daily".to_string(),
        compat.daily.map(JsonValue::from).unwrap_or(JsonValue::Null),
    );
    m.insert(
        "relationship_lifetime".to_string(),
        compat
            .lifetime
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
    );
    m.insert("is_friend".to_string(), JsonValue::Bool(compat.is_friend));
    JsonValue::Object(m)
}

fn str_array(names: &[&'static str]) -> JsonValue {
    JsonValue::Array(
        names
            .iter()
            .map(|name| JsonValue::String((*name).to_string()))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

pub fn render_sim_listing(sims: &[Sim], families: &[Family]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<24} {:<6} {:<7} {}", "id", "name", "age", "gender", "family");
    for sim in sims {
        let family_name = family_of(families, sim)
            .map(|family| family.name.as_str())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:<6} {:<7} {}",
            sim.id, sim.name, sim.age, sim.gender, family_name
        );
    }
    out
}

pub fn render_family_listing(families: &[Family]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:>6} {:>10}  members",
        "id", "name", "house", "budget"
    );
    for family in families {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>6} {:>10}  {}",
            family.chunk_id,
            family.name,
            family.house_number,
            family.budget,
            family.member_guids.len()
        );
    }
    out
}

pub fn render_compatibility_listing(rankings: &[Compatibility], sims: &[Sim]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:>5}  common / risky",
        "id", "name", "score"
    );
    for ranking in rankings {
        let name = sims
            .iter()
            .find(|sim| sim.id == ranking.sim_id)
            .map(|sim| sim.name.as_str())
            .unwrap_or("?");
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>5}  {} / {}",
            ranking.sim_id,
            name,
            ranking.score,
            ranking.common_interests.join(", "),
            ranking.risky_topics.join(", ")
        );
    }
    out
}
