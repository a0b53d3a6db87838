//! Opaque byte-blob persistence.
//!
//! The blob format is versioned and checksummed but is not a documented
//! wire format — it is an implementation detail of `save`/`load`, free to
//! change between versions. Layout: `[version: u8][crc32: u32 LE][len: u32
//! LE][bincode payload]`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = 1 + 4 + 4;

/// Serializes `value` into a versioned, checksummed byte blob.
pub fn save<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value).map_err(|e| Error::Io(e.to_string()))?;
    let checksum = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.push(FORMAT_VERSION);
    buf.extend_from_slice(&checksum.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Reconstructs a value from a blob written by [`save`]. Fails with
/// [`Error::Io`] on a truncated blob, an unsupported version byte, or a
/// checksum mismatch.
pub fn load<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::Io("blob shorter than header".to_string()));
    }

    let version = bytes[0];
    if version != FORMAT_VERSION {
        return Err(Error::Io(format!("unsupported blob version {version}")));
    }

    let checksum = u32::from_le_bytes(bytes[1..5].try_into().unwrap());
    let len = u32::from_le_bytes(bytes[5..9].try_into().unwrap()) as usize;

    let payload = bytes
        .get(HEADER_LEN..HEADER_LEN + len)
        .ok_or_else(|| Error::Io("blob truncated".to_string()))?;

    if crc32fast::hash(payload) != checksum {
        return Err(Error::Io("checksum mismatch".to_string()));
    }

    bincode::deserialize(payload).map_err(|e| Error::Io(e.to_string()))
}
