//! A minimal challenge catalog: enough metadata to annotate challenge-log
//! records with human-readable names and known bonus/maximum values.
//!
//! The reference implementation's full catalog lives in a data module that
//! wasn't part of the source material this crate was built against; the
//! entries below are illustrative, not exhaustive, and annotation is
//! always optional (an id absent from the catalog is simply left
//! unannotated rather than treated as an error).

/// One catalog entry: everything needed to validate/describe a challenge
/// record without requiring the full in-game catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeInfo {
    /// Stable challenge id as stored in the save file.
    pub id: u32,
    /// Human-readable name.
    pub name: &'static str,
    /// The per-level bonus value the challenge-log mutation engine adds.
    pub bonus: i32,
    /// The maximum value this challenge can reach.
    pub max_value: i32,
}

/// A lookup table from challenge id to its [`ChallengeInfo`].
#[derive(Debug, Clone, Copy)]
pub struct ChallengeCatalog {
    entries: &'static [ChallengeInfo],
}

impl ChallengeCatalog {
    /// Build a catalog from a static entry table.
    pub const fn new(entries: &'static [ChallengeInfo]) -> Self {
        Self { entries }
    }

    /// Look up a challenge by id.
    pub fn get(&self, id: u32) -> Option<&ChallengeInfo> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterate over every challenge this catalog knows about.
    pub fn iter(&self) -> impl Iterator<Item = &'static ChallengeInfo> {
        self.entries.iter()
    }
}

/// A small, representative set of challenges shared by both games.
pub const SAMPLE_CHALLENGES: ChallengeCatalog = ChallengeCatalog::new(&[
    ChallengeInfo { id: 1, name: "Enemies Killed", bonus: 1, max_value: 999_999 },
    ChallengeInfo { id: 2, name: "Headshots", bonus: 1, max_value: 999_999 },
    ChallengeInfo { id: 3, name: "Critical Hits", bonus: 1, max_value: 999_999 },
    ChallengeInfo { id: 4, name: "Money Earned", bonus: 1, max_value: 999_999_999 },
    ChallengeInfo { id: 5, name: "Distance Traveled", bonus: 1, max_value: 999_999 },
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup_hit_and_miss() {
        assert_eq!(SAMPLE_CHALLENGES.get(2).unwrap().name, "Headshots");
        assert!(SAMPLE_CHALLENGES.get(9999).is_none());
    }
}
