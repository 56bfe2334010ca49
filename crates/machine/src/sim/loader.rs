//! Binary Loader.
//!
//! This module turns program images into segment 0. It performs:
//! 1. **Binary loading:** Reads an image from disk into a byte buffer.
//! 2. **Word packing:** Groups bytes into big-endian 32-bit words.
//! 3. **Validation:** Rejects images that end in a partial word, unless configured to drop it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::common::constants::WORD_BYTES;
use crate::common::{Fault, Word};
use crate::config::Config;

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read file '{}': {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The image is not a whole number of words.
    #[error(transparent)]
    Malformed(#[from] Fault),
}

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// `LoadError::Read` if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Packs a big-endian byte image into instruction words.
///
/// # Arguments
///
/// * `bytes` - The raw image; each group of four bytes is one word, most significant byte first.
/// * `allow_trailing_bytes` - Drop a final partial word instead of rejecting the image.
///
/// # Errors
///
/// `Fault::MalformedProgram` if the length is not a multiple of four and
/// `allow_trailing_bytes` is false.
pub fn pack_words(bytes: &[u8], allow_trailing_bytes: bool) -> Result<Vec<Word>, Fault> {
    let chunks = bytes.chunks_exact(WORD_BYTES);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        if !allow_trailing_bytes {
            return Err(Fault::MalformedProgram { len: bytes.len() });
        }
        warn!(len = bytes.len(), trailing, "dropping partial trailing word");
    }
    Ok(chunks
        .map(|w| Word::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect())
}

/// Reads a program image and packs it into words according to `config`.
///
/// # Errors
///
/// `LoadError::Read` if the file cannot be read, `LoadError::Malformed` if
/// it ends in a partial word.
pub fn load_program(path: impl AsRef<Path>, config: &Config) -> Result<Vec<Word>, LoadError> {
    let path = path.as_ref();
    let bytes = load_binary(path)?;
    let words = pack_words(&bytes, config.loader.allow_trailing_bytes)?;
    debug!(path = %path.display(), words = words.len(), "program loaded");
    Ok(words)
}
