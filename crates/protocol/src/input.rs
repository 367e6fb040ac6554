//! UTF-8 decoding of raw transaction input, with optional gzip inflation
//! once ESIP-7 is active.

use miniz_oxide::inflate::decompress_to_vec_with_limit;

/// Cap on inflated input size. Inputs that inflate beyond this are treated
/// as undecodable rather than ballooning memory.
const MAX_INFLATED_LEN: usize = 10 * 1024 * 1024;

/// The RFC 1952 gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes raw transaction input into a UTF-8 string.
///
/// When `support_gzip` is set and the input carries the gzip magic header,
/// the input is inflated first. Undecodable input (bad gzip framing, inflate
/// failure, invalid UTF-8, embedded NUL) yields `None`; the caller treats
/// that as "no creation candidate", never as an error.
pub fn utf8_input(input: &[u8], support_gzip: bool) -> Option<String> {
    let bytes = if support_gzip && input.starts_with(&GZIP_MAGIC) {
        gunzip(input)?
    } else {
        input.to_vec()
    };

    let text = String::from_utf8(bytes).ok()?;
    if text.contains('\0') {
        return None;
    }
    Some(text)
}

/// Inflates a single gzip member: strips the RFC 1952 framing and raw
/// inflates the deflate stream within.
fn gunzip(data: &[u8]) -> Option<Vec<u8>> {
    // Fixed header: magic, compression method (8 = deflate), flags, mtime,
    // extra flags, OS. 10 bytes total, then optional fields per FLG.
    if data.len() < 18 || data[2] != 8 {
        return None;
    }
    let flags = data[3];
    let mut pos = 10;

    // FEXTRA
    if flags & 0x04 != 0 {
        let xlen = u16::from_le_bytes([*data.get(pos)?, *data.get(pos + 1)?]) as usize;
        pos = pos.checked_add(2 + xlen)?;
    }
    // FNAME, then FCOMMENT: NUL-terminated strings.
    for mask in [0x08u8, 0x10] {
        if flags & mask != 0 {
            let nul = data.get(pos..)?.iter().position(|&b| b == 0)?;
            pos += nul + 1;
        }
    }
    // FHCRC
    if flags & 0x02 != 0 {
        pos = pos.checked_add(2)?;
    }

    // The last 8 bytes are CRC32 and ISIZE; the deflate stream sits between.
    let deflate = data.get(pos..data.len().checked_sub(8)?)?;
    decompress_to_vec_with_limit(deflate, MAX_INFLATED_LEN).ok()
}
