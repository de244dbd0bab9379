//! Reading and writing the persisted snapshot format.
//!
//! Snapshots are pretty-printed JSON with a trailing newline. Paths ending
//! in `.gz` are gzip-compressed. Saving always applies the canonical order
//! (records by key, nested collections per [`NameRecord::canonicalize`]),
//! so `save(load(save(s)))` reproduces `save(s)` byte for byte.
//!
//! [`NameRecord::canonicalize`]: super::types::NameRecord::canonicalize

use super::types::Snapshot;
use crate::error::{Error, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::debug;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Load a snapshot from disk. The returned snapshot's `source` is the path.
pub fn load(path: &Path) -> Result<Snapshot> {
    let start = Instant::now();

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let reader = BufReader::new(file);
    let mut snapshot = if is_gzip(path) {
        from_reader(GzDecoder::new(reader), path)?
    } else {
        from_reader(reader, path)?
    };
    snapshot.source = path.display().to_string();

    debug!(
        path = %path.display(),
        records = snapshot.records.len(),
        elapsed = ?start.elapsed(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Read failures that mean the bytes are malformed rather than unreadable:
/// a bad gzip header or stream.
fn is_malformed(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof
    )
}

/// Parse a snapshot from any reader. `origin` is only used in errors.
///
/// The result is in canonical order whatever order the source used.
pub fn from_reader<R: Read>(mut reader: R, origin: &Path) -> Result<Snapshot> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        if is_malformed(&e) {
            Error::corrupt(origin, e)
        } else {
            Error::io(origin, e)
        }
    })?;

    let parse_start = Instant::now();
    let mut snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| Error::corrupt(origin, e))?;
    debug!(elapsed = ?parse_start.elapsed(), "snapshot parsed");

    for (key, record) in &snapshot.records {
        let expected = record.key().canonical();
        if *key != expected {
            return Err(Error::corrupt(
                origin,
                format!("record key `{}` does not match its ns/name `{}`", key, expected),
            ));
        }
    }

    snapshot.canonicalize();
    Ok(snapshot)
}

/// Write a snapshot in canonical order, replacing any existing file.
///
/// The data goes to a temporary file next to `path` that is renamed into
/// place once complete, so a failed save leaves the previous file intact.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;

    {
        let writer = BufWriter::new(staged.as_file());
        if is_gzip(path) {
            let mut encoder = GzEncoder::new(writer, Compression::best());
            to_writer(snapshot, &mut encoder, path)?;
            encoder
                .finish()
                .and_then(|mut w| w.flush())
                .map_err(|e| Error::io(path, e))?;
        } else {
            let mut writer = writer;
            to_writer(snapshot, &mut writer, path)?;
            writer.flush().map_err(|e| Error::io(path, e))?;
        }
    }

    staged.persist(path).map_err(|e| Error::io(path, e.error))?;

    debug!(
        path = %path.display(),
        records = snapshot.records.len(),
        "snapshot saved"
    );
    Ok(())
}

/// Serialize a snapshot in canonical order to any writer. Only a snapshot
/// that is not already canonical gets copied for sorting.
pub fn to_writer<W: Write>(snapshot: &Snapshot, mut writer: W, origin: &Path) -> Result<()> {
    let canonical = if snapshot.is_canonical() {
        Cow::Borrowed(snapshot)
    } else {
        let mut sorted = snapshot.clone();
        sorted.canonicalize();
        Cow::Owned(sorted)
    };

    serde_json::to_writer_pretty(&mut writer, canonical.as_ref()).map_err(|e| {
        if e.is_io() {
            Error::io(origin, e.into())
        } else {
            Error::corrupt(origin, e)
        }
    })?;
    writer.write_all(b"\n").map_err(|e| Error::io(origin, e))
}

/// SHA-256 of the persisted bytes, as lowercase hex.
pub fn fingerprint(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(content);
    Ok(format!("{:x}", hasher.finalize()))
}
