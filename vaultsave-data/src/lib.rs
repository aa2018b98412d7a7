//! # vaultsave-data
//!
//! Static, per-game constant tables: the shared experience curve, item
//! record bit layouts, and each game's black-market/backpack/bank
//! sizing. Everything here is data, not behavior — the codec and
//! mutation crates consume it but don't own it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod challenge;
pub mod profile;
pub mod xp;

pub use challenge::{ChallengeCatalog, ChallengeInfo, SAMPLE_CHALLENGES};
pub use profile::{AmmoPool, GAME_A, GAME_B, Game, GameProfile, ITEM_HEADER_BITS, profile_for};
pub use xp::{REQUIRED_XP, xp_bounds};
