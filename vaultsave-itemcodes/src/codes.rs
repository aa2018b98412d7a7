//! Base-64 item-code lines: `PREFIX(<base64>)`, grouped under `; Bank`,
//! `; Items`, and `; Weapons` section headers.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

use crate::error::{ItemCodesError, Result};

const BANK_HEADER: &str = "; Bank";
const ITEMS_HEADER: &str = "; Items";
const WEAPONS_HEADER: &str = "; Weapons";

/// Which save-file container an item code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The bank's stored items.
    Bank,
    /// The backpack inventory.
    Items,
    /// Equipped/holstered weapons.
    Weapons,
}

impl Section {
    fn header(self) -> &'static str {
        match self {
            Section::Bank => BANK_HEADER,
            Section::Items => ITEMS_HEADER,
            Section::Weapons => WEAPONS_HEADER,
        }
    }

    fn from_header(line: &str) -> Option<Section> {
        match line.trim() {
            BANK_HEADER => Some(Section::Bank),
            ITEMS_HEADER => Some(Section::Items),
            WEAPONS_HEADER => Some(Section::Weapons),
            _ => None,
        }
    }
}

/// A parsed item-code listing, grouped by container.
#[derive(Debug, Clone, Default)]
pub struct ItemCodeFile {
    /// Bank items, as wrapped item/weapon blobs.
    pub bank: Vec<Vec<u8>>,
    /// Backpack items.
    pub items: Vec<Vec<u8>>,
    /// Weapons.
    pub weapons: Vec<Vec<u8>>,
}

impl ItemCodeFile {
    fn section_mut(&mut self, section: Section) -> &mut Vec<Vec<u8>> {
        match section {
            Section::Bank => &mut self.bank,
            Section::Items => &mut self.items,
            Section::Weapons => &mut self.weapons,
        }
    }

    fn section(&self, section: Section) -> &[Vec<u8>] {
        match section {
            Section::Bank => &self.bank,
            Section::Items => &self.items,
            Section::Weapons => &self.weapons,
        }
    }
}

/// Format a single wrapped item/weapon blob as an item-code line.
pub fn encode_item_line(prefix: &str, wrapped: &[u8]) -> String {
    format!("{prefix}({})", STANDARD.encode(wrapped))
}

/// Parse a single item-code line, returning its prefix and decoded
/// payload. Blank lines and section headers are not valid input here;
/// callers should filter them out first (see [`parse_item_code_file`]).
pub fn decode_item_line(line: &str) -> Result<(String, Vec<u8>)> {
    let line = line.trim();
    let open = line.find('(').ok_or_else(|| ItemCodesError::MalformedLine(line.to_string()))?;
    if !line.ends_with(')') {
        return Err(ItemCodesError::MalformedLine(line.to_string()));
    }
    let prefix = &line[..open];
    let body = &line[open + 1..line.len() - 1];
    if prefix.is_empty() {
        return Err(ItemCodesError::MalformedLine(line.to_string()));
    }
    let bytes = STANDARD.decode(body)?;
    Ok((prefix.to_string(), bytes))
}

/// Parse a full item-code listing, validating every line's prefix
/// against `expected_prefix` (`BL2` for Game A, `BLTPS` for Game B).
/// Lines before the first section header are treated as `Items`,
/// matching the reference tool's default container.
pub fn parse_item_code_file(text: &str, expected_prefix: &str) -> Result<ItemCodeFile> {
    let mut file = ItemCodeFile::default();
    let mut section = Section::Items;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(found) = Section::from_header(line) {
            section = found;
            continue;
        }
        let (prefix, bytes) = decode_item_line(line)?;
        if prefix != expected_prefix {
            return Err(ItemCodesError::UnexpectedPrefix {
                found: prefix,
                expected: expected_prefix.to_string(),
            });
        }
        file.section_mut(section).push(bytes);
    }

    Ok(file)
}

/// Render an [`ItemCodeFile`] back into the line-oriented listing
/// format, emitting a section header whenever its container is
/// non-empty.
pub fn format_item_code_file(file: &ItemCodeFile, prefix: &str) -> String {
    let mut out = String::new();
    for section in [Section::Bank, Section::Items, Section::Weapons] {
        let items = file.section(section);
        if items.is_empty() {
            continue;
        }
        out.push_str(section.header());
        out.push('\n');
        for wrapped in items {
            out.push_str(&encode_item_line(prefix, wrapped));
            out.push('\n');
        }
    }
    out
}

/// Whether a wrapped item blob is a synthetic envelope (`set == 255`,
/// every other field zero) used to carry non-item state rather than a
/// real item. These are never exported as item codes.
pub fn is_synthetic(wrapped: &[u8]) -> Result<bool> {
    let (_, values, _) = vaultsave_item::unwrap_item(wrapped)?;
    Ok(values.first().copied().flatten() == Some(255) && values.iter().skip(1).all(|v| v.unwrap_or(0) == 0))
}

/// Re-key a wrapped item for import: the reference tool always assigns
/// freshly imported items a new random 32-bit key so they don't collide
/// with (or alias) keys already used in the destination save.
pub fn import_item(wrapped: &[u8], rng: &mut impl Rng) -> Result<Vec<u8>> {
    let new_key: i32 = rng.random();
    Ok(vaultsave_item::replace_key(wrapped, new_key)?)
}
