//! Bit-exact serialization of the register array.
//!
//! The wire format is a bare blob: one packed 16-bit cell per register,
//! little-endian, register `j` at byte offset `2j`. No header, version
//! tag, or checksum; the only compatibility check is the fixed length.

use crate::error::HyperMinHashError;
use crate::registers::{Registers, SERIALIZED_LEN};

pub(crate) fn encode(regs: &Registers) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SERIALIZED_LEN);
    for &cell in regs.as_cells() {
        buf.extend_from_slice(&cell.to_le_bytes());
    }
    buf
}

pub(crate) fn decode(buf: &[u8]) -> Result<Registers, HyperMinHashError> {
    if buf.len() != SERIALIZED_LEN {
        return Err(HyperMinHashError::FormatError(format!(
            "serialized sketch must be exactly {} bytes, got {}",
            SERIALIZED_LEN,
            buf.len()
        )));
    }
    let cells = buf
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(Registers::from_cells(cells))
}
