//! Local `.fvecs`/`.ivecs` file readers.
//!
//! The format stores each vector as a little-endian `i32` dimension prefix
//! followed by that many 4-byte elements, back to back with no separators.
//! `.ivecs` is the same layout with `i32` elements instead of `f32`.
//! Downloading datasets is out of scope here — callers point at a file
//! already on disk.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::vector::Matrix;

/// Reads a `.fvecs` file into a [`Matrix`]. Every record must share the
/// same dimension; a mismatched record fails with [`Error::InvalidShape`].
pub fn read_fvecs(path: impl AsRef<Path>) -> Result<Matrix> {
    let bytes = fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    read_fvecs_bytes(&bytes)
}

/// Reads `.fvecs`-formatted bytes already in memory.
pub fn read_fvecs_bytes(bytes: &[u8]) -> Result<Matrix> {
    let mut offset = 0;
    let mut matrix: Option<Matrix> = None;

    while offset < bytes.len() {
        let d = read_u32_le(bytes, offset)? as usize;
        offset += 4;

        let record_len = d * 4;
        let record = bytes
            .get(offset..offset + record_len)
            .ok_or_else(|| Error::Io("truncated fvecs record".to_string()))?;
        offset += record_len;

        let row: Vec<f32> = record
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        let m = matrix.get_or_insert_with(|| Matrix::new(d));
        if m.dim() != d {
            return Err(Error::InvalidShape { expected: m.dim(), got: d });
        }
        m.push(&row);
    }

    Ok(matrix.unwrap_or_else(|| Matrix::new(0)))
}

/// Reads a `.ivecs` file (same layout, `i32` elements) into row vectors.
pub fn read_ivecs(path: impl AsRef<Path>) -> Result<Vec<Vec<i32>>> {
    let bytes = fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    read_ivecs_bytes(&bytes)
}

/// Reads `.ivecs`-formatted bytes already in memory.
pub fn read_ivecs_bytes(bytes: &[u8]) -> Result<Vec<Vec<i32>>> {
    let mut offset = 0;
    let mut rows = Vec::new();

    while offset < bytes.len() {
        let d = read_u32_le(bytes, offset)? as usize;
        offset += 4;

        let record_len = d * 4;
        let record = bytes
            .get(offset..offset + record_len)
            .ok_or_else(|| Error::Io("truncated ivecs record".to_string()))?;
        offset += record_len;

        rows.push(record.chunks_exact(4).map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect());
    }

    Ok(rows)
}

fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32> {
    let slice = bytes
        .get(offset..offset + 4)
        .ok_or_else(|| Error::Io("truncated vecs header".to_string()))?;
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}
