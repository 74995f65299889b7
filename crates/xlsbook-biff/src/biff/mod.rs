//! BIFF8 record layer
//!
//! A Workbook stream is a flat list of records: a type id and a body length
//! (both `u16`), then the body. Bodies longer than [`MAX_RECORD_DATA`]
//! spill into CONTINUE records that follow directly.

pub mod parser;
pub mod records;
pub mod strings;

use std::io::{ErrorKind, Read, Seek};

use crate::error::{BiffError, BiffResult};
use parser::read_u16;

/// Largest record body BIFF8 allows
pub const MAX_RECORD_DATA: usize = 8224;

/// One logical record, CONTINUE bodies included
#[derive(Debug)]
pub struct BiffRecord {
    pub record_type: u16,
    pub data: Vec<u8>,
    /// Where each CONTINUE body starts inside `data`; string tables need
    /// these to find split characters
    pub continue_offsets: Vec<usize>,
    /// Position of the record header in the stream
    pub stream_offset: u64,
}

/// Read every record of a Workbook stream
///
/// Stops at end of stream or at the zero padding that follows the last EOF.
pub fn read_all_records<R: Read + Seek>(stream: &mut R) -> BiffResult<Vec<BiffRecord>> {
    let mut out: Vec<BiffRecord> = Vec::new();

    loop {
        let position = stream.stream_position()?;
        let mut header = [0u8; 4];
        if let Err(e) = stream.read_exact(&mut header) {
            if e.kind() == ErrorKind::UnexpectedEof {
                break;
            }
            return Err(e.into());
        }
        let [t0, t1, l0, l1] = header;
        let record_type = u16::from_le_bytes([t0, t1]);
        let len = usize::from(u16::from_le_bytes([l0, l1]));
        if record_type == 0 && len == 0 {
            break;
        }

        let mut body = vec![0u8; len];
        stream.read_exact(&mut body)?;

        if record_type != records::CONTINUE {
            out.push(BiffRecord {
                record_type,
                data: body,
                continue_offsets: Vec::new(),
                stream_offset: position,
            });
            continue;
        }
        match out.last_mut() {
            Some(parent) => {
                parent.continue_offsets.push(parent.data.len());
                parent.data.append(&mut body);
            }
            None => log::warn!("CONTINUE at byte {position} has no record to extend"),
        }
    }

    Ok(out)
}

/// BIFF version and substream type from a BOF body
pub fn parse_bof(data: &[u8]) -> BiffResult<(u16, u16)> {
    let mut off = 0;
    let version = read_u16(data, &mut off);
    let kind = read_u16(data, &mut off);
    match (version, kind) {
        (Ok(version), Ok(kind)) => Ok((version, kind)),
        _ => Err(BiffError::InvalidFormat("BOF record too short".into())),
    }
}

/// Append one record to `out`, splitting bodies longer than
/// [`MAX_RECORD_DATA`] into CONTINUE records.
pub fn write_record(out: &mut Vec<u8>, record_type: u16, body: &[u8]) {
    let mut chunks = body.chunks(MAX_RECORD_DATA);
    let first = chunks.next().unwrap_or(&[]);
    write_record_header(out, record_type, first.len());
    out.extend_from_slice(first);
    for chunk in chunks {
        write_record_header(out, records::CONTINUE, chunk.len());
        out.extend_from_slice(chunk);
    }
}

/// Append a record header
pub fn write_record_header(out: &mut Vec<u8>, record_type: u16, len: usize) {
    out.extend_from_slice(&record_type.to_le_bytes());
    out.extend_from_slice(&(len as u16).to_le_bytes());
}
