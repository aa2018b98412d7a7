//! vaultsave - command-line editor for Game A / Game B binary save files.

mod cli;
mod error;
mod items;
mod mutation;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::Parser;
use vaultsave_core::Endian;
use vaultsave_data::profile_for;
use vaultsave_proto::PlayerRecord;

use cli::{Cli, OutputMode};
use error::{CliError, Result};

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read(path)?)
    }
}

fn write_output(path: &Path, force: bool, data: &[u8]) -> Result<()> {
    if path == Path::new("-") {
        io::stdout().write_all(data)?;
        return Ok(());
    }
    if !force && path.exists() {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    fs::write(path, data)?;
    Ok(())
}

fn decode_player(cli: &Cli, data: &[u8]) -> Result<(PlayerRecord, Endian)> {
    match cli.effective_output_mode() {
        OutputMode::Decodedjson | OutputMode::Json if looks_like_json_input(data) => {
            let value: serde_json::Value = serde_json::from_slice(data)?;
            let player = if vaultsave_itemcodes::looks_like_raw_dump(&value) {
                vaultsave_itemcodes::from_decoded_json(&value)?
            } else {
                vaultsave_itemcodes::from_json(&value)?
            };
            let endian = if cli.bigendian { Endian::Big } else { Endian::Little };
            Ok((player, endian))
        }
        _ => {
            let (payload, endian) = vaultsave_container::decode(data)?;
            let player = vaultsave_proto::record::decode(&payload)?;
            Ok((player, endian))
        }
    }
}

fn looks_like_json_input(data: &[u8]) -> bool {
    data.iter().find(|b| !b.is_ascii_whitespace()).is_some_and(|b| *b == b'{')
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.input == Path::new("-") && cli.output.is_none() {
        return Err(CliError::Config(
            "reading from standard input requires an explicit output path".into(),
        ));
    }
    if let Some(output) = &cli.output {
        if output == &cli.input && cli.input != Path::new("-") {
            return Err(CliError::Config(
                "input and output cannot be the same file".into(),
            ));
        }
    }

    let mode = cli.effective_output_mode();
    if cli.output.is_none() {
        if cli.requests_changes() {
            return Err(CliError::Config(
                "no output path was given, but changes were requested".into(),
            ));
        }
        if mode != OutputMode::Savegame && mode != OutputMode::None {
            return Err(CliError::Config(format!(
                "no output path was given, but output mode '{mode:?}' requires one"
            )));
        }
    }

    let profile = profile_for(cli.game.into());
    let catalog = vaultsave_data::SAMPLE_CHALLENGES;

    if cli.print_unexplored_levels {
        for level in 1..=profile.max_level + 5 {
            if vaultsave_data::xp_bounds(level).is_none() {
                println!("level {level} has no entry in the XP curve");
            }
        }
    }

    let raw_input = read_input(&cli.input)?;
    let (mut player, endian) = decode_player(&cli, &raw_input)?;

    if let Some(import_path) = &cli.import_items {
        let text = fs::read_to_string(import_path)?;
        let file = vaultsave_itemcodes::parse_item_code_file(&text, profile.item_prefix)?;
        let mut rng = rand::rng();
        items::import_items(&mut player, &file, &mut rng)?;
        if !cli.quiet {
            eprintln!("imported items from {}", import_path.display());
        }
    }

    let config = mutation::build_config(&cli, profile);
    vaultsave_mutate::apply(&config, profile, &catalog, endian, &mut player)?;

    // No output path, no requested changes, and the default output mode:
    // nothing to write. Already validated above that this is the only
    // way `cli.output` can be absent at this point.
    let Some(output_path) = cli.output.clone() else {
        if !cli.quiet {
            eprintln!("no output path given; nothing written");
        }
        return Ok(());
    };

    if mode == OutputMode::None {
        if !cli.quiet {
            eprintln!("mutations applied; no output written (--output-mode none)");
        }
        return Ok(());
    }

    let out_bytes = match mode {
        OutputMode::Savegame => {
            let payload = vaultsave_proto::record::encode(&player);
            vaultsave_container::encode(&payload, endian)?
        }
        OutputMode::Decoded => vaultsave_proto::record::encode(&player),
        OutputMode::Decodedjson => {
            serde_json::to_vec_pretty(&vaultsave_itemcodes::to_decoded_json(&player))?
        }
        OutputMode::Json => serde_json::to_vec_pretty(&vaultsave_itemcodes::to_json(&player))?,
        OutputMode::Items => {
            let file = items::export_items(&player)?;
            vaultsave_itemcodes::format_item_code_file(&file, profile.item_prefix).into_bytes()
        }
        OutputMode::None => unreachable!(),
    };

    write_output(&output_path, cli.force, &out_bytes)?;
    if !cli.quiet {
        eprintln!("wrote {} bytes to {}", out_bytes.len(), output_path.display());
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
