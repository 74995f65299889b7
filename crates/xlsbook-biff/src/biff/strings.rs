//! BIFF8 Unicode strings.
//!
//! BIFF8 strings have a complex encoding:
//! - Header: char_count (2 bytes, or 1 for short strings) + flags (1 byte)
//! - Flags bit 0 (`fHighByte`): 0 = compressed Latin-1, 1 = uncompressed UTF-16LE
//! - Flags bit 2 (`fExtSt`): extended string data follows (Asian phonetic)
//! - Flags bit 3 (`fRichSt`): rich text run array follows
//! - If fRichSt: 2-byte run count follows the flags
//! - If fExtSt: 4-byte extended data size follows
//! - Then the character data
//! - Then the rich text runs (4 bytes each) if fRichSt
//! - Then the extended data if fExtSt
//!
//! In SST records, strings can span CONTINUE records. The CONTINUE record
//! can change the encoding (compressed ↔ uncompressed) mid-string via a
//! new flags byte at the start of the continuation.

use super::parser::{read_u16, read_u32, read_u8};
use super::{records, write_record_header, MAX_RECORD_DATA};
use crate::error::{BiffError, BiffResult};

/// Longest string a cell can hold, in UTF-16 code units
pub const MAX_STRING_LEN: usize = 32_767;

/// Read a BIFF8 "short" string (1-byte length prefix, used in BOUNDSHEET etc.).
pub fn read_short_string(data: &[u8], offset: &mut usize) -> BiffResult<String> {
    let char_count = read_u8(data, offset)? as u16;
    let flags = read_u8(data, offset)?;
    read_character_data(data, offset, char_count, flags)
}

/// Read a BIFF8 Unicode string with a 2-byte length prefix (used in LABEL,
/// FORMAT, STRING).
///
/// This does NOT handle CONTINUE boundaries; [`parse_sst`] does that for
/// the shared string table.
pub fn read_unicode_string(data: &[u8], offset: &mut usize) -> BiffResult<String> {
    read_string_with_boundaries(data, offset, &[])
}

fn read_string_with_boundaries(
    data: &[u8],
    offset: &mut usize,
    boundaries: &[usize],
) -> BiffResult<String> {
    let char_count = read_u16(data, offset)? as usize;
    let flags = read_u8(data, offset)?;

    let is_rich = (flags & 0x08) != 0;
    let has_ext = (flags & 0x04) != 0;

    let run_count = if is_rich { read_u16(data, offset)? } else { 0 };
    let ext_size = if has_ext { read_u32(data, offset)? } else { 0 };

    let mut units: Vec<u16> = Vec::with_capacity(char_count);
    let mut is_wide = (flags & 0x01) != 0;
    while units.len() < char_count {
        if boundaries.contains(offset) {
            // Character data resumes in a CONTINUE body after a fresh flags byte
            is_wide = (read_u8(data, offset)? & 0x01) != 0;
        }
        let limit = boundaries
            .iter()
            .copied()
            .find(|&b| b > *offset)
            .unwrap_or(data.len());
        let width = if is_wide { 2 } else { 1 };
        let take = ((limit - *offset) / width).min(char_count - units.len());
        if take == 0 {
            return Err(BiffError::Parse(format!(
                "string data too short at offset {}: read {} of {} characters",
                *offset,
                units.len(),
                char_count
            )));
        }
        read_units(data, offset, take, is_wide, &mut units)?;
    }

    // Skip rich text runs (4 bytes each: char_pos u16 + font_idx u16)
    *offset += run_count as usize * 4;
    // Skip extended string data
    *offset += ext_size as usize;

    String::from_utf16(&units).map_err(|e| BiffError::Parse(format!("invalid UTF-16 string: {e}")))
}

fn read_units(
    data: &[u8],
    offset: &mut usize,
    count: usize,
    is_wide: bool,
    out: &mut Vec<u16>,
) -> BiffResult<()> {
    let byte_len = if is_wide { count * 2 } else { count };
    if *offset + byte_len > data.len() {
        return Err(BiffError::Parse(format!(
            "string data too short: need {} bytes at offset {}, have {}",
            byte_len,
            *offset,
            data.len().saturating_sub(*offset)
        )));
    }
    let bytes = &data[*offset..*offset + byte_len];
    if is_wide {
        out.extend(bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])));
    } else {
        out.extend(bytes.iter().map(|&b| b as u16));
    }
    *offset += byte_len;
    Ok(())
}

/// Read character data (no header) given char_count and flags byte.
fn read_character_data(
    data: &[u8],
    offset: &mut usize,
    char_count: u16,
    flags: u8,
) -> BiffResult<String> {
    let mut units = Vec::with_capacity(char_count as usize);
    read_units(data, offset, char_count as usize, (flags & 0x01) != 0, &mut units)?;
    String::from_utf16(&units).map_err(|e| BiffError::Parse(format!("invalid UTF-16 string: {e}")))
}

/// Parse the SST (Shared String Table) from its merged body.
///
/// `boundaries` are the offsets where CONTINUE bodies begin, as recorded by
/// [`read_all_records`](super::read_all_records).
///
/// The SST body starts with:
/// - `total_strings` (4 bytes, u32): total string refs in workbook
/// - `unique_strings` (4 bytes, u32): number of unique strings in this table
/// - Then `unique_strings` Unicode string entries
pub fn parse_sst(data: &[u8], boundaries: &[usize]) -> BiffResult<Vec<String>> {
    let mut offset = 0;

    let _total_strings = read_u32(data, &mut offset)?;
    let unique_count = read_u32(data, &mut offset)? as usize;

    let mut strings = Vec::with_capacity(unique_count.min(data.len()));

    for i in 0..unique_count {
        match read_string_with_boundaries(data, &mut offset, boundaries) {
            Ok(s) => strings.push(s),
            Err(e) => {
                // Some files carry truncated or padded tables; keep what was read
                log::warn!("SST parse error at string {i}/{unique_count}: {e}");
                break;
            }
        }
    }

    Ok(strings)
}

/// UTF-16 code units of `s` and whether any needs two bytes
fn encode(s: &str, max_len: usize) -> (Vec<u16>, bool) {
    let mut units: Vec<u16> = s.encode_utf16().collect();
    if units.len() > max_len {
        log::warn!("string truncated from {} to {} characters", units.len(), max_len);
        units.truncate(max_len);
    }
    let wide = units.iter().any(|&u| u > 0xFF);
    (units, wide)
}

fn push_units(out: &mut Vec<u8>, units: &[u16], wide: bool) {
    if wide {
        for u in units {
            out.extend_from_slice(&u.to_le_bytes());
        }
    } else {
        out.extend(units.iter().map(|&u| u as u8));
    }
}

/// Append a string with a 2-byte length prefix
pub fn write_unicode_string(out: &mut Vec<u8>, s: &str) {
    let (units, wide) = encode(s, MAX_STRING_LEN);
    out.extend_from_slice(&(units.len() as u16).to_le_bytes());
    out.push(wide as u8);
    push_units(out, &units, wide);
}

/// Append a string with a 1-byte length prefix
pub fn write_short_string(out: &mut Vec<u8>, s: &str) {
    let (units, wide) = encode(s, u8::MAX as usize);
    out.push(units.len() as u8);
    out.push(wide as u8);
    push_units(out, &units, wide);
}

/// Append the SST record (and its CONTINUE records) for `strings`.
///
/// A string header never straddles two records; character data that does
/// not fit resumes in a CONTINUE record after a fresh flags byte.
pub fn write_sst(out: &mut Vec<u8>, strings: &[String], total_refs: u32) {
    let mut bodies: Vec<Vec<u8>> = Vec::new();
    let mut current = Vec::with_capacity(MAX_RECORD_DATA);
    current.extend_from_slice(&total_refs.to_le_bytes());
    current.extend_from_slice(&(strings.len() as u32).to_le_bytes());

    for s in strings {
        let (units, wide) = encode(s, MAX_STRING_LEN);
        let width = if wide { 2 } else { 1 };

        // Header plus the first character must fit together
        if current.len() + 3 + width > MAX_RECORD_DATA {
            bodies.push(std::mem::take(&mut current));
        }
        current.extend_from_slice(&(units.len() as u16).to_le_bytes());
        current.push(wide as u8);

        let mut rest = units.as_slice();
        while !rest.is_empty() {
            let room = (MAX_RECORD_DATA - current.len()) / width;
            if room == 0 {
                bodies.push(std::mem::take(&mut current));
                current.push(wide as u8);
                continue;
            }
            let n = room.min(rest.len());
            push_units(&mut current, &rest[..n], wide);
            rest = &rest[n..];
        }
    }
    bodies.push(current);

    for (i, body) in bodies.iter().enumerate() {
        let record_type = if i == 0 { records::SST } else { records::CONTINUE };
        write_record_header(out, record_type, body.len());
        out.extend_from_slice(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biff::read_all_records;
    use std::io::Cursor;

    #[test]
    fn test_read_compressed_string() {
        // char_count = 3 (u16 LE), flags = 0x00, data = "ABC"
        let data = [0x03, 0x00, 0x00, b'A', b'B', b'C'];
        let mut offset = 0;
        let s = read_unicode_string(&data, &mut offset).unwrap();
        assert_eq!(s, "ABC");
        assert_eq!(offset, 6);
    }

    #[test]
    fn test_read_wide_string() {
        // char_count = 2 (u16 LE), flags = 0x01, data = H\0i\0
        let data = [0x02, 0x00, 0x01, b'H', 0x00, b'i', 0x00];
        let mut offset = 0;
        let s = read_unicode_string(&data, &mut offset).unwrap();
        assert_eq!(s, "Hi");
        assert_eq!(offset, 7);
    }

    #[test]
    fn test_read_rich_string_skips_runs() {
        // "AB" with one rich text run, followed by a marker byte
        let data = [0x02, 0x00, 0x08, 0x01, 0x00, b'A', b'B', 0, 0, 5, 0, 0xEE];
        let mut offset = 0;
        assert_eq!(read_unicode_string(&data, &mut offset).unwrap(), "AB");
        assert_eq!(data[offset], 0xEE);
    }

    #[test]
    fn test_short_string_write_read() {
        let mut buf = Vec::new();
        write_short_string(&mut buf, "Données");
        assert_eq!(buf[1], 0x00); // é fits in Latin-1
        let mut offset = 0;
        assert_eq!(read_short_string(&buf, &mut offset).unwrap(), "Données");

        let mut buf = Vec::new();
        write_unicode_string(&mut buf, "Σ 1");
        assert_eq!(buf[2], 0x01);
        let mut offset = 0;
        assert_eq!(read_unicode_string(&buf, &mut offset).unwrap(), "Σ 1");
        assert_eq!(offset, buf.len());
    }

    #[test]
    fn test_parse_sst() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u32.to_le_bytes()); // total
        buf.extend_from_slice(&2u32.to_le_bytes()); // unique
        buf.extend_from_slice(&[0x01, 0x00, 0x00, b'A']);
        buf.extend_from_slice(&[0x02, 0x00, 0x00, b'B', b'C']);

        let strings = parse_sst(&buf, &[]).unwrap();
        assert_eq!(strings, vec!["A", "BC"]);
    }

    #[test]
    fn test_sst_spanning_continue_records() {
        let long_latin = "x".repeat(9000);
        let long_wide = "ж".repeat(5000);
        let strings = vec![
            "first".to_string(),
            long_latin.clone(),
            long_wide.clone(),
            "last".to_string(),
        ];

        let mut out = Vec::new();
        write_sst(&mut out, &strings, 10);
        let recs = read_all_records(&mut Cursor::new(out)).unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].continue_offsets.len() >= 2);

        let parsed = parse_sst(&recs[0].data, &recs[0].continue_offsets).unwrap();
        assert_eq!(parsed, strings);
    }

    #[test]
    fn test_continue_can_switch_encoding() {
        // "AB" compressed, then "C" as UTF-16 after a continuation flags byte
        let mut data = Vec::new();
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[0x03, 0x00, 0x00, b'A', b'B']);
        let boundary = data.len();
        data.extend_from_slice(&[0x01, b'C', 0x00]);

        let parsed = parse_sst(&data, &[boundary]).unwrap();
        assert_eq!(parsed, vec!["ABC"]);
    }
}
