//! # vaultsave-challenge
//!
//! Codec for the fixed-layout challenge-log block embedded in a player
//! record: a small header plus a run of 12-byte challenge entries, with
//! optional annotation against a [`vaultsave_data::ChallengeCatalog`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod error;

pub use block::{ChallengeEntry, ChallengeLog, annotate, decode, encode};
pub use error::{ChallengeError, Result};
