//! Append-only magnetization sample files.
//!
//! A sample file is a flat run of host-endian `f32` values. The first
//! value records β so analysis tools never have to re-derive it from the
//! file name; every following value is one normalized absolute
//! magnetization. Appends from a resumed run continue the same file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Appends magnetization samples to one on-disk sample file.
pub struct SampleWriter {
    file: File,
}

impl SampleWriter {
    /// Open the sample file for appending, creating it (and parent
    /// directories) if needed. A freshly created file gets the β header.
    ///
    /// A run killed mid-write can leave a trailing partial value, or a
    /// header stub shorter than one value; both are truncated away here
    /// so appended samples stay frame-aligned.
    ///
    /// Returns the writer and the number of samples already recorded.
    pub fn append(path: &Path, beta: f64) -> io::Result<(Self, u64)> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut len = file.metadata()?.len();
        if len % 4 != 0 {
            len -= len % 4;
            file.set_len(len)?;
        }
        let existing = if len == 0 {
            file.write_all(&(beta as f32).to_ne_bytes())?;
            0
        } else {
            len / 4 - 1
        };
        Ok((Self { file }, existing))
    }

    /// Append one sample. Unbuffered: each sample represents many sweeps
    /// of work, so it goes straight to disk where a crash cannot lose it.
    pub fn push(&mut self, value: f64) -> io::Result<()> {
        self.file.write_all(&(value as f32).to_ne_bytes())
    }
}

/// Read a sample file back as `(beta, samples)`.
///
/// A trailing partial value (from a run killed mid-write) is ignored.
///
/// # Errors
///
/// I/O errors, or `InvalidData` if the file is too short to hold the β
/// header.
pub fn read_samples(path: &Path) -> io::Result<(f32, Vec<f32>)> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    if bytes.len() < 4 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("sample file {} is missing its header", path.display()),
        ));
    }
    let mut values = bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]));
    let beta = values.next().unwrap_or(0.0);
    Ok((beta, values.collect()))
}
