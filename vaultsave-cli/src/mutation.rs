//! Translates parsed command-line flags into a [`vaultsave_mutate::Config`].

use std::collections::HashSet;

use vaultsave_data::GameProfile;
use vaultsave_mutate::Config;

use crate::cli::{Cli, SizeArg};

fn resolve_size(arg: SizeArg, max: u32) -> u32 {
    match arg {
        SizeArg::Max => max,
        SizeArg::Exact(n) => n,
    }
}

/// Build a mutation [`Config`] from the parsed CLI flags.
pub fn build_config(cli: &Cli, profile: &GameProfile) -> Config {
    Config {
        level: cli.level,
        money: cli.money,
        eridium: cli.eridium,
        moonstone: cli.moonstone,
        seraph: cli.seraph,
        torgue: cli.torgue,
        itemlevels: cli.itemlevels,
        forceitemlevels: cli.forceitemlevels,
        oplevel: cli.oplevel,
        backpack: cli.backpack.map(|s| resolve_size(s, profile.max_backpack_size)),
        bank: cli.bank.map(|s| resolve_size(s, profile.max_bank_size)),
        gunslots: cli.gunslots,
        copy_nvhm_missions: cli.copy_nvhm_missions,
        unlock: cli.unlock.iter().map(|u| (*u).into()).collect::<HashSet<_>>(),
        maxammo: cli.maxammo,
        challenges: cli.challenges.iter().map(|c| (*c).into()).collect::<HashSet<_>>(),
        fix_challenge_overflow: cli.fix_challenge_overflow,
        name: cli.name.clone(),
        save_game_id: cli.save_game_id,
    }
}
