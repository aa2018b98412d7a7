//! The fixed-layout challenge-log block: a 10-byte header followed by a
//! run of 12-byte challenge records.
//!
//! Byte order is not fixed — the block is embedded inside a player
//! record whose own byte order depends on the save version, so every
//! function here takes an explicit [`Endian`].

use vaultsave_core::Endian;
use vaultsave_data::{ChallengeCatalog, ChallengeInfo};

use crate::error::{ChallengeError, Result};

const HEADER_LEN: usize = 10;
const ENTRY_LEN: usize = 12;

/// One challenge-log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeEntry {
    /// Stable id for this challenge (the first two bytes of the record,
    /// read together as a short).
    pub id: u16,
    /// Unknown flag byte, observed as 6 or 7 in practice.
    pub first_one: u8,
    /// Cumulative value across all challenge resets.
    pub total_value: u32,
    /// Unknown flag byte, observed as 1 in practice.
    pub second_one: u8,
    /// The value `total_value` was at when challenges were last reset;
    /// zero if they never have been.
    pub previous_value: u32,
}

impl ChallengeEntry {
    /// The challenge's actual current value: `total_value` minus
    /// whatever was already accumulated before the last reset. Valid
    /// whether or not a reset has ever happened (`previous_value` is
    /// zero until one does).
    pub fn current_value(&self) -> u32 {
        self.total_value.saturating_sub(self.previous_value)
    }
}

/// A full challenge-log block: the header's unknown field plus every
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeLog {
    /// Header field observed as a constant `4` in practice; preserved
    /// verbatim on re-encode rather than assumed.
    pub unknown: u32,
    /// This save's challenge records.
    pub entries: Vec<ChallengeEntry>,
}

/// Decode a challenge-log block, validating both of its internal size
/// invariants against the actual data length.
pub fn decode(data: &[u8], endian: Endian) -> Result<ChallengeLog> {
    if data.len() < HEADER_LEN {
        return Err(ChallengeError::TooShort { len: data.len() });
    }

    let unknown = endian.read_u32(&data[0..4]);
    let size_in_bytes = endian.read_u32(&data[4..8]);
    let num_challenges = endian.read_u16(&data[8..10]);

    let actual = (data.len() - 8) as u32;
    if size_in_bytes != actual {
        return Err(ChallengeError::SizeMismatch { size_in_bytes, actual });
    }

    let expected_bytes = (num_challenges as u32) * ENTRY_LEN as u32;
    if expected_bytes != size_in_bytes.saturating_sub(2) {
        return Err(ChallengeError::CountMismatch { count: num_challenges, bytes: size_in_bytes - 2 });
    }

    let mut entries = Vec::with_capacity(num_challenges as usize);
    for i in 0..num_challenges as usize {
        let start = HEADER_LEN + i * ENTRY_LEN;
        let record = &data[start..start + ENTRY_LEN];
        entries.push(ChallengeEntry {
            id: endian.read_u16(&record[0..2]),
            first_one: record[2],
            total_value: endian.read_u32(&record[3..7]),
            second_one: record[7],
            previous_value: endian.read_u32(&record[8..12]),
        });
    }

    Ok(ChallengeLog { unknown, entries })
}

/// Encode a challenge-log block. `size_in_bytes` and `num_challenges`
/// are derived from `log.entries.len()`, not trusted from any prior
/// decode.
pub fn encode(log: &ChallengeLog, endian: Endian) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + log.entries.len() * ENTRY_LEN);
    out.extend_from_slice(&endian.write_u32(log.unknown));
    let size_in_bytes = (log.entries.len() * ENTRY_LEN + 2) as u32;
    out.extend_from_slice(&endian.write_u32(size_in_bytes));
    out.extend_from_slice(&endian.write_u16(log.entries.len() as u16));

    for entry in &log.entries {
        out.extend_from_slice(&endian.write_u16(entry.id));
        out.push(entry.first_one);
        out.extend_from_slice(&endian.write_u32(entry.total_value));
        out.push(entry.second_one);
        out.extend_from_slice(&endian.write_u32(entry.previous_value));
    }
    out
}

/// Look up catalog metadata for `entry`, if its id is known. Returns
/// `None` rather than an error for unrecognized ids — annotation is a
/// convenience, not a requirement for a record to be valid.
pub fn annotate<'a>(entry: &ChallengeEntry, catalog: &'a ChallengeCatalog) -> Option<&'a ChallengeInfo> {
    catalog.get(entry.id as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultsave_data::SAMPLE_CHALLENGES;

    fn sample_log() -> ChallengeLog {
        ChallengeLog {
            unknown: 4,
            entries: vec![
                ChallengeEntry { id: 1, first_one: 6, total_value: 100, second_one: 1, previous_value: 0 },
                ChallengeEntry { id: 2, first_one: 7, total_value: 5000, second_one: 1, previous_value: 1200 },
            ],
        }
    }

    #[test]
    fn test_roundtrip_little_endian() {
        let log = sample_log();
        let encoded = encode(&log, Endian::Little);
        let decoded = decode(&encoded, Endian::Little).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn test_roundtrip_big_endian() {
        let log = sample_log();
        let encoded = encode(&log, Endian::Big);
        let decoded = decode(&encoded, Endian::Big).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn test_empty_log_roundtrips() {
        let log = ChallengeLog { unknown: 4, entries: vec![] };
        let encoded = encode(&log, Endian::Little);
        assert_eq!(encoded.len(), HEADER_LEN);
        assert_eq!(decode(&encoded, Endian::Little).unwrap(), log);
    }

    #[test]
    fn test_current_value_accounts_for_reset() {
        let entry = ChallengeEntry { id: 9, first_one: 6, total_value: 5000, second_one: 1, previous_value: 1200 };
        assert_eq!(entry.current_value(), 3800);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let log = sample_log();
        let mut encoded = encode(&log, Endian::Little);
        encoded.truncate(encoded.len() - 1);
        assert!(matches!(decode(&encoded, Endian::Little), Err(ChallengeError::SizeMismatch { .. })));
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let log = sample_log();
        let mut encoded = encode(&log, Endian::Little);
        // Claim one fewer challenge than size_in_bytes actually implies.
        let wrong_count = (log.entries.len() as u16 - 1).to_le_bytes();
        encoded[8] = wrong_count[0];
        encoded[9] = wrong_count[1];
        assert!(matches!(decode(&encoded, Endian::Little), Err(ChallengeError::CountMismatch { .. })));
    }

    #[test]
    fn test_annotate_known_and_unknown_ids() {
        let known = ChallengeEntry { id: 2, first_one: 7, total_value: 0, second_one: 1, previous_value: 0 };
        let unknown = ChallengeEntry { id: 99_999, first_one: 7, total_value: 0, second_one: 1, previous_value: 0 };
        assert_eq!(annotate(&known, &SAMPLE_CHALLENGES).unwrap().name, "Headshots");
        assert!(annotate(&unknown, &SAMPLE_CHALLENGES).is_none());
    }
}
