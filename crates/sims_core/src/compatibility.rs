//! Interest-agreement scoring between decoded sims.
//!
//! Conversation outcomes in the source game are interest-driven: a topic
//! lands well for a sim at affinity 400 or above on the normalized 0-1000
//! scale and badly below it. Compatibility therefore measures per-topic
//! agreement: topics both sims care about are common ground weighted by the
//! weaker affinity, topics only one cares about are risky weighted by the
//! gap, and topics neither cares about never come up.

use serde::Serialize;

use crate::model::{Interests, Sim};

/// Affinity at or above this counts as interested.
pub const INTEREST_THRESHOLD: i32 = 400;

/// Largest possible raw magnitude: every topic common (or risky) at full
/// affinity.
const MAX_RAW: i64 = Interests::TOPIC_COUNT as i64 * 1000;

#[derive(Debug, Clone, Serialize)]
pub struct Compatibility {
    /// Local id of the candidate sim.
    pub sim_id: i16,
    /// Final score, 0-1000.
    pub score: i32,
    pub common_interests: Vec<&'static str>,
    pub risky_topics: Vec<&'static str>,
    /// Existing relationship from the ranking sim to the candidate; absent
    /// if they have never met.
    pub daily: Option<i32>,
    pub lifetime: Option<i32>,
    pub is_friend: bool,
}

/// Score the interest agreement between two sims: final score plus the
/// common and risky topic names.
pub fn interest_score(a: &Interests, b: &Interests) -> (i32, Vec<&'static str>, Vec<&'static str>) {
    let mut common = Vec::new();
    let mut risky = Vec::new();
    let mut raw: i64 = 0;

    let values_a = a.topic_values();
    let values_b = b.topic_values();
    for (index, name) in Interests::TOPIC_NAMES.iter().enumerate() {
        let value_a = i32::from(values_a[index]);
        let value_b = i32::from(values_b[index]);
        let a_interested = value_a >= INTEREST_THRESHOLD;
        let b_interested = value_b >= INTEREST_THRESHOLD;

        if a_interested && b_interested {
            common.push(*name);
            raw += i64::from(value_a.min(value_b));
        } else if a_interested != b_interested {
            risky.push(*name);
            raw -= i64::from((value_a - value_b).abs());
        }
        // Mutual disinterest: no contribution.
    }

    let score = ((raw + MAX_RAW) * 1000 / (2 * MAX_RAW)).clamp(0, 1000) as i32;
    (score, common, risky)
}

/// Full compatibility of `other` from `sim`'s point of view.
pub fn compatibility(sim: &Sim, other: &Sim) -> Compatibility {
    let (score, common_interests, risky_topics) = interest_score(&sim.interests, &other.interests);
    let relationship = sim.relationships.get(&i32::from(other.id));

    Compatibility {
        sim_id: other.id,
        score,
        common_interests,
        risky_topics,
        daily: relationship.map(|rel| rel.daily),
        lifetime: relationship.map(|rel| rel.lifetime),
        is_friend: relationship.is_some_and(|rel| rel.is_friend),
    }
}

/// Rank all other sims by compatibility with `sim`, best first. The source
/// sim is excluded; ties keep their roster order.
pub fn rank_compatibility(sim: &Sim, all_sims: &[Sim]) -> Vec<Compatibility> {
    let mut rankings: Vec<Compatibility> = all_sims
        .iter()
        .filter(|other| other.id != sim.id)
        .map(|other| compatibility(sim, other))
        .collect();
    rankings.sort_by(|a, b| b.score.cmp(&a.score));
    rankings
}
