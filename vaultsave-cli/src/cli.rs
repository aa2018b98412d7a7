//! Command-line argument surface.
//!
//! Unlike a multi-format archiver, one invocation of this tool only ever
//! does one thing to one file, so the arguments are a single flat
//! struct rather than a subcommand tree.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use vaultsave_data::Game;
use vaultsave_mutate::{ChallengeOp, Unlock};

/// A size argument that accepts either a literal count or the word
/// `max`, matching `--backpack`/`--bank`.
#[derive(Debug, Clone, Copy)]
pub enum SizeArg {
    /// Grow to the game's maximum size.
    Max,
    /// Grow to exactly this many slots.
    Exact(u32),
}

impl FromStr for SizeArg {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(SizeArg::Max)
        } else {
            Ok(SizeArg::Exact(s.parse()?))
        }
    }
}

/// Which game a save belongs to. The reference tool ships this as two
/// separate executables; this one picks between their constant tables
/// with a flag instead.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GameArg {
    /// Game A.
    A,
    /// Game B.
    B,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::A => Game::A,
            GameArg::B => Game::B,
        }
    }
}

/// What shape to write the output in.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputMode {
    /// A complete, re-playable save file (the default).
    #[default]
    Savegame,
    /// The decoded field-record payload, as raw bytes (no JSON).
    Decoded,
    /// The raw tagged tree, as JSON.
    Decodedjson,
    /// The Latin-1-cast schema-mapped tree, as JSON.
    Json,
    /// A base-64 item-code listing of the bank/inventory/weapons.
    Items,
    /// Apply requested mutations but don't write anything.
    None,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnlockArg {
    /// Unlock the Creature Slaughterdome.
    Slaughterdome,
    /// Unlock True Vault Hunter Mode.
    Tvhm,
    /// Unlock Ultimate Vault Hunter Mode.
    Uvhm,
    /// Mark every challenge as unlocked.
    Challenges,
    /// Unlock every black-market ammo SDU.
    Ammo,
}

impl From<UnlockArg> for Unlock {
    fn from(arg: UnlockArg) -> Self {
        match arg {
            UnlockArg::Slaughterdome => Unlock::Slaughterdome,
            UnlockArg::Tvhm => Unlock::Tvhm,
            UnlockArg::Uvhm => Unlock::Uvhm,
            UnlockArg::Challenges => Unlock::Challenges,
            UnlockArg::Ammo => Unlock::Ammo,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChallengeOpArg {
    /// Reset every known challenge to its starting value.
    Zero,
    /// Set every known challenge to one below its max.
    Max,
    /// Apply each challenge's bonus value, where it has one.
    Bonus,
}

impl From<ChallengeOpArg> for ChallengeOp {
    fn from(arg: ChallengeOpArg) -> Self {
        match arg {
            ChallengeOpArg::Zero => ChallengeOp::Zero,
            ChallengeOpArg::Max => ChallengeOp::Max,
            ChallengeOpArg::Bonus => ChallengeOp::Bonus,
        }
    }
}

/// Command-line save-file editor for Game A / Game B binary saves.
#[derive(Parser, Debug)]
#[command(name = "vaultsave", author, version, about = "Decode, mutate, and re-encode a binary save file")]
pub struct Cli {
    /// Input save file. Use `-` to read from standard input.
    pub input: PathBuf,

    /// Output file. Use `-` to write to standard output. Cannot be the
    /// same path as the input (unless the input is standard input); if
    /// omitted, changes must not be requested and the output mode must
    /// be `savegame` or `none`.
    pub output: Option<PathBuf>,

    /// Which game this save belongs to.
    #[arg(long, value_enum, default_value = "a")]
    pub game: GameArg,

    /// What shape to write the output in.
    #[arg(long, value_enum, default_value = "savegame")]
    pub output_mode: OutputMode,

    /// Shorthand for `--output-mode json`.
    #[arg(long)]
    pub json: bool,

    /// Treat the input as big-endian when it isn't a full save
    /// container (e.g. a raw decoded payload) and endianness can't be
    /// detected from a header.
    #[arg(long)]
    pub bigendian: bool,

    /// Overwrite the output path even if it already exists.
    #[arg(long)]
    pub force: bool,

    /// Suppress informational output.
    #[arg(long)]
    pub quiet: bool,

    /// Import item codes from this listing before re-encoding.
    #[arg(short = 'i', long = "import-items", value_name = "FILE")]
    pub import_items: Option<PathBuf>,

    /// Print every level whose XP requirement isn't covered by the
    /// built-in curve (diagnostic; the curve is fixed-length).
    #[arg(long)]
    pub print_unexplored_levels: bool,

    /// Set character level.
    #[arg(long)]
    pub level: Option<u32>,
    /// Set cash on hand.
    #[arg(long)]
    pub money: Option<u64>,
    /// Set Eridium (Game A).
    #[arg(long)]
    pub eridium: Option<u64>,
    /// Set Moonstone (Game B; shares a slot with Eridium).
    #[arg(long)]
    pub moonstone: Option<u64>,
    /// Set Seraph Crystals.
    #[arg(long)]
    pub seraph: Option<u64>,
    /// Set Torgue Tokens.
    #[arg(long)]
    pub torgue: Option<u64>,

    /// Set every item/weapon to this level (0 means "use character
    /// level").
    #[arg(long)]
    pub itemlevels: Option<u32>,
    /// Also re-level items already above level 1.
    #[arg(long)]
    pub forceitemlevels: bool,

    /// Unlock an Overpower level (0..=10).
    #[arg(long)]
    pub oplevel: Option<u32>,

    /// Backpack size, or `max`.
    #[arg(long)]
    pub backpack: Option<SizeArg>,
    /// Bank size, or `max`.
    #[arg(long)]
    pub bank: Option<SizeArg>,
    /// Number of equippable weapon slots.
    #[arg(long)]
    pub gunslots: Option<u32>,

    /// Copy NVHM mission progress into TVHM and UVHM.
    #[arg(long)]
    pub copy_nvhm_missions: bool,

    /// Unlock toggles; may be given more than once.
    #[arg(long = "unlock", value_enum)]
    pub unlock: Vec<UnlockArg>,

    /// Set every black-market ammo pool to its maximum.
    #[arg(long)]
    pub maxammo: bool,

    /// Challenge-value operations; may be given more than once.
    #[arg(long = "challenges", value_enum)]
    pub challenges: Vec<ChallengeOpArg>,

    /// Reset challenge totals that look like they've overflowed.
    #[arg(long)]
    pub fix_challenge_overflow: bool,

    /// Set the character's name.
    #[arg(long)]
    pub name: Option<String>,
    /// Set the save-slot id.
    #[arg(long)]
    pub save_game_id: Option<u32>,
}

impl Cli {
    /// The output mode to actually use, folding `--json` into
    /// `--output-mode`.
    pub fn effective_output_mode(&self) -> OutputMode {
        if self.json && self.output_mode == OutputMode::Savegame {
            OutputMode::Json
        } else {
            self.output_mode
        }
    }

    /// Whether any flag was given that actually mutates the save (as
    /// opposed to just re-encoding or exporting it unchanged).
    pub fn requests_changes(&self) -> bool {
        self.import_items.is_some()
            || self.level.is_some()
            || self.money.is_some()
            || self.eridium.is_some()
            || self.moonstone.is_some()
            || self.seraph.is_some()
            || self.torgue.is_some()
            || self.itemlevels.is_some()
            || self.oplevel.is_some()
            || self.backpack.is_some()
            || self.bank.is_some()
            || self.gunslots.is_some()
            || self.copy_nvhm_missions
            || !self.unlock.is_empty()
            || self.maxammo
            || !self.challenges.is_empty()
            || self.fix_challenge_overflow
            || self.name.is_some()
            || self.save_game_id.is_some()
    }
}
