//! Binary checkpoint format for [`Lattice`].
//!
//! Layout: 4 magic bytes, 1 format version byte, little-endian `u32`
//! extent, then the raw words of every line — even sublattice then odd,
//! increasing line index, word 0 first. No compression, no padding, no
//! per-line framing; the extent fixes every length. A round-trip
//! reproduces the bit pattern exactly.

use std::io::{Read, Write};

use crate::error::CheckpointError;
use crate::lattice::{Lattice, Sublattice};
use crate::line::Line;

/// Magic bytes at the start of every checkpoint file.
pub const CHECKPOINT_MAGIC: [u8; 4] = *b"GLBC";
/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u8 = 1;

pub(crate) fn write_checkpoint<W: Write>(
    lattice: &Lattice,
    w: &mut W,
) -> Result<(), CheckpointError> {
    w.write_all(&CHECKPOINT_MAGIC)?;
    w.write_all(&[CHECKPOINT_VERSION])?;
    w.write_all(&lattice.extent().to_le_bytes())?;
    for sub in Sublattice::BOTH {
        for line in lattice.lines(sub) {
            line.write_into(w)?;
        }
    }
    Ok(())
}

pub(crate) fn read_checkpoint<R: Read>(
    r: &mut R,
    configured: u32,
) -> Result<Lattice, CheckpointError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != CHECKPOINT_MAGIC {
        return Err(CheckpointError::InvalidMagic);
    }

    let mut version = [0u8; 1];
    r.read_exact(&mut version)?;
    if version[0] != CHECKPOINT_VERSION {
        return Err(CheckpointError::UnsupportedVersion { found: version[0] });
    }

    let mut extent_buf = [0u8; 4];
    r.read_exact(&mut extent_buf)?;
    let recorded = u32::from_le_bytes(extent_buf);
    Lattice::validate_extent(recorded)?;
    if recorded != configured {
        return Err(CheckpointError::ExtentMismatch {
            recorded,
            configured,
        });
    }

    let half = recorded / 2;
    let mut sublattices: [Vec<Line>; 2] = [Vec::new(), Vec::new()];
    for (si, sub) in sublattices.iter_mut().enumerate() {
        sub.reserve(recorded as usize);
        for index in 0..recorded as usize {
            let line = Line::read_from(r, half)?;
            if !line.padding_clear() {
                return Err(CheckpointError::MalformedLine {
                    sublattice: si,
                    index,
                });
            }
            sub.push(line);
        }
    }
    Ok(Lattice::from_parts(recorded, sublattices))
}
