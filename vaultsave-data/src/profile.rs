//! Per-game constant tables: item layout, backpack/bank sizing, and
//! black-market ammo pricing.

/// Which of the two supported games a save file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    /// Game A (item struct version 7, max level 80).
    A,
    /// Game B (item struct version 10, max level 70).
    B,
}

/// Bit widths of an item record's variable-width fields, in encoding
/// order. Shared verbatim between both games.
pub const ITEM_FIELD_BITS: [(&str, u8); 17] = [
    ("version", 8),
    ("balance", 17),
    ("manufacturer", 20),
    ("quality", 11),
    ("equipped", 7),
    ("level", 7),
    ("prefix1", 16),
    ("prefix2", 16),
    ("prefix3", 16),
    ("prefix4", 16),
    ("prefix5", 16),
    ("prefix6", 16),
    ("prefix7", 16),
    ("prefix8", 16),
    ("prefix9", 16),
    ("prefix10", 16),
    ("prefix11", 16),
];

/// Weapon item records use a slightly wider layout; same idea, one extra
/// parts slot.
pub const WEAPON_FIELD_BITS: [(&str, u8); 17] = [
    ("version", 8),
    ("balance", 13),
    ("manufacturer", 20),
    ("quality", 11),
    ("equipped", 7),
    ("level", 7),
    ("prefix1", 17),
    ("prefix2", 17),
    ("prefix3", 17),
    ("prefix4", 17),
    ("prefix5", 17),
    ("prefix6", 17),
    ("prefix7", 17),
    ("prefix8", 17),
    ("prefix9", 17),
    ("prefix10", 17),
    ("prefix11", 17),
];

/// `(type_bits, balance_bits, manufacturer_bits)` for the item header,
/// indexed by `is_weapon`.
pub const ITEM_HEADER_BITS: [(u8, u8, u8); 2] = [(8, 10, 7), (6, 10, 7)];

/// An ammo pool and the per-level black-market capacities it unlocks.
#[derive(Debug, Clone, Copy)]
pub struct AmmoPool {
    /// Short name matching the black-market key this pool is tied to.
    pub name: &'static str,
    /// Resource pool capacity at each of the 8 black-market levels.
    pub levels: [u32; 8],
}

/// All per-game constants needed by the mutation engine and item codec.
#[derive(Debug, Clone, Copy)]
pub struct GameProfile {
    /// The game this profile describes.
    pub game: Game,
    /// Item struct version stamped into every packed item/weapon.
    pub item_struct_version: u8,
    /// Maximum character level.
    pub max_level: u32,
    /// Three-letter prefix used by exported item codes (`BL2`/`BTP`).
    pub item_prefix: &'static str,
    /// Minimum backpack size (the game's built-in starting capacity).
    pub min_backpack_size: u32,
    /// Maximum backpack size the black market can reach.
    pub max_backpack_size: u32,
    /// Minimum bank size.
    pub min_bank_size: u32,
    /// Maximum bank size the black market can reach.
    pub max_bank_size: u32,
    /// Ammo pools unlockable through the black market.
    pub ammo_pools: &'static [AmmoPool],
}

/// Game A's profile (item struct version 7, matches the reference
/// implementation's `AppBL2` constants exactly).
pub const GAME_A: GameProfile = GameProfile {
    game: Game::A,
    item_struct_version: 7,
    max_level: 80,
    item_prefix: "BL2",
    min_backpack_size: 12,
    max_backpack_size: 39,
    min_bank_size: 6,
    max_bank_size: 24,
    ammo_pools: &[
        AmmoPool { name: "grenade", levels: [3, 4, 5, 6, 7, 8, 9, 10] },
        AmmoPool { name: "launcher", levels: [12, 15, 18, 21, 24, 27, 30, 33] },
        AmmoPool { name: "pistol", levels: [200, 300, 400, 500, 600, 700, 800, 900] },
        AmmoPool { name: "rifle", levels: [280, 420, 560, 700, 840, 980, 1120, 1260] },
        AmmoPool { name: "shotgun", levels: [80, 100, 120, 140, 160, 180, 200, 220] },
        AmmoPool { name: "smg", levels: [360, 540, 720, 900, 1080, 1260, 1440, 1620] },
        AmmoPool { name: "sniper", levels: [48, 60, 72, 84, 96, 108, 120, 132] },
    ],
};

/// Game B's profile. The reference implementation ships Game B support as
/// a separate, unkept script; these values follow the same shape as
/// [`GAME_A`] but with Game B's known item struct version and level cap,
/// and are called out as best-effort in the design notes rather than
/// lifted from a kept source file.
pub const GAME_B: GameProfile = GameProfile {
    game: Game::B,
    item_struct_version: 10,
    max_level: 70,
    item_prefix: "BLTPS",
    min_backpack_size: 12,
    max_backpack_size: 39,
    min_bank_size: 6,
    max_bank_size: 24,
    ammo_pools: &[
        AmmoPool { name: "grenade", levels: [3, 4, 5, 6, 7, 8, 9, 10] },
        AmmoPool { name: "launcher", levels: [12, 15, 18, 21, 24, 27, 30, 33] },
        AmmoPool { name: "pistol", levels: [200, 300, 400, 500, 600, 700, 800, 900] },
        AmmoPool { name: "rifle", levels: [280, 420, 560, 700, 840, 980, 1120, 1260] },
        AmmoPool { name: "shotgun", levels: [80, 100, 120, 140, 160, 180, 200, 220] },
        AmmoPool { name: "smg", levels: [360, 540, 720, 900, 1080, 1260, 1440, 1620] },
        AmmoPool { name: "sniper", levels: [48, 60, 72, 84, 96, 108, 120, 132] },
        AmmoPool { name: "laser", levels: [80, 100, 120, 140, 160, 180, 200, 220] },
    ],
};

/// Look up the constant profile for `game`.
pub fn profile_for(game: Game) -> &'static GameProfile {
    match game {
        Game::A => &GAME_A,
        Game::B => &GAME_B,
    }
}

impl GameProfile {
    /// Find the ammo pool with the given short name, if this game has one.
    pub fn ammo_pool(&self, name: &str) -> Option<&'static AmmoPool> {
        self.ammo_pools.iter().find(|pool| pool.name == name)
    }
}
