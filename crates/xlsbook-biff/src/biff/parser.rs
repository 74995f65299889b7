//! Cursor-style readers for record payloads
//!
//! Each reader takes the payload and a byte offset, and moves the offset past
//! what it consumed. BIFF8 stores integers and doubles little-endian. On a
//! short payload the offset is left untouched.

use crate::error::{BiffError, BiffResult};

fn take<const N: usize>(data: &[u8], offset: &mut usize) -> BiffResult<[u8; N]> {
    let bytes = offset
        .checked_add(N)
        .and_then(|end| data.get(*offset..end))
        .ok_or_else(|| {
            BiffError::Parse(format!(
                "record truncated: {} bytes wanted at offset {}, payload is {}",
                N,
                *offset,
                data.len()
            ))
        })?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    *offset += N;
    Ok(out)
}

#[inline]
pub fn read_u8(data: &[u8], offset: &mut usize) -> BiffResult<u8> {
    take::<1>(data, offset).map(|[b]| b)
}

#[inline]
pub fn read_u16(data: &[u8], offset: &mut usize) -> BiffResult<u16> {
    take(data, offset).map(u16::from_le_bytes)
}

#[inline]
pub fn read_u32(data: &[u8], offset: &mut usize) -> BiffResult<u32> {
    take(data, offset).map(u32::from_le_bytes)
}

#[inline]
pub fn read_f64(data: &[u8], offset: &mut usize) -> BiffResult<f64> {
    take(data, offset).map(f64::from_le_bytes)
}

/// Number packed into 32 bits, as found in RK and MULRK records
///
/// Bit 0 asks for a division by 100. With bit 1 set, bits 2..32 hold a
/// signed 30-bit integer; otherwise they are the high 30 bits of a double
/// whose low 34 bits are zero.
#[inline]
pub fn decode_rk(rk: u32) -> f64 {
    let value = if rk & 0x02 != 0 {
        f64::from((rk as i32) >> 2)
    } else {
        f64::from_bits(u64::from(rk & !0x03) << 32)
    };

    if rk & 0x01 != 0 {
        value / 100.0
    } else {
        value
    }
}

#[inline]
pub fn read_rk(data: &[u8], offset: &mut usize) -> BiffResult<f64> {
    read_u32(data, offset).map(decode_rk)
}
