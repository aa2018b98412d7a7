//! The set of mutations a single [`crate::apply`] call can perform.

use std::collections::HashSet;

/// Named unlock toggles, matching the reference tool's `--unlock` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unlock {
    /// Unlock the Creature Slaughterdome.
    Slaughterdome,
    /// Unlock True Vault Hunter Mode.
    Tvhm,
    /// Unlock Ultimate Vault Hunter Mode (implies TVHM).
    Uvhm,
    /// Mark every non-level-specific challenge as unlocked/seen.
    Challenges,
    /// Unlock every black-market ammo SDU.
    Ammo,
}

/// Named challenge-value operations, matching `--challenges`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeOp {
    /// Reset every known challenge back to its starting value.
    Zero,
    /// Set every known challenge to one below its max.
    Max,
    /// Apply each challenge's bonus value, where it has one.
    Bonus,
}

/// A full description of the mutations to apply to a save's player
/// record. Every value option is `None`/empty by default, meaning
/// "leave this alone".
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Target character level.
    pub level: Option<u32>,

    /// Money (cash on hand).
    pub money: Option<u64>,
    /// Eridium (Game A's rare currency).
    pub eridium: Option<u64>,
    /// Moonstone (Game B's rare currency; shares a storage slot with
    /// `eridium`, matching the reference tool).
    pub moonstone: Option<u64>,
    /// Seraph Crystals.
    pub seraph: Option<u64>,
    /// Torgue Tokens.
    pub torgue: Option<u64>,

    /// Set every item/weapon's level. `Some(0)` means "use the
    /// character's current level" instead of a fixed value; `Some(n)`
    /// with `n > 0` sets a fixed level.
    pub itemlevels: Option<u32>,
    /// When set, `itemlevels` also updates items that are already above
    /// level 1 (the reference tool otherwise leaves those untouched and
    /// only logs a notice).
    pub forceitemlevels: bool,

    /// Overpower level to unlock (0..=10).
    pub oplevel: Option<u32>,

    /// Backpack size; rounded down to the nearest valid SDU count.
    pub backpack: Option<u32>,
    /// Bank size; rounded down to the nearest valid SDU count.
    pub bank: Option<u32>,
    /// Number of equippable weapon slots.
    pub gunslots: Option<u32>,

    /// Copy NVHM mission progress over TVHM and UVHM.
    pub copy_nvhm_missions: bool,

    /// Which unlock toggles to apply.
    pub unlock: HashSet<Unlock>,

    /// Set every black-market ammo pool to its maximum.
    pub maxammo: bool,

    /// Which challenge-value operations to apply.
    pub challenges: HashSet<ChallengeOp>,
    /// Reset any challenge whose total value looks like it has
    /// overflowed (>= 2,000,000,000) back to one above its max.
    pub fix_challenge_overflow: bool,

    /// New character name.
    pub name: Option<String>,
    /// New save-slot id (only applied if `> 0`).
    pub save_game_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_requests_nothing() {
        let config = Config::default();
        assert!(config.level.is_none());
        assert!(config.unlock.is_empty());
        assert!(config.challenges.is_empty());
        assert!(!config.maxammo);
        assert!(!config.fix_challenge_overflow);
    }

    #[test]
    fn unlock_and_challenge_ops_are_hashable() {
        let mut unlock = HashSet::new();
        unlock.insert(Unlock::Uvhm);
        unlock.insert(Unlock::Uvhm);
        assert_eq!(unlock.len(), 1);

        let mut ops = HashSet::new();
        ops.insert(ChallengeOp::Max);
        ops.insert(ChallengeOp::Bonus);
        assert_eq!(ops.len(), 2);
    }
}
