//! Dictionary of known key names used to resolve hashed keys.
//!
//! A dictionary file holds one entry per line, either as a hex hash followed by a space
//! and the name, or as a bare name whose hash is computed with [`crate::hash::hash64`]:
//!
//! ```text
//! deadbeef greeting
//! game_client_quit
//! ```
//!
//! A line is only read as `<hash> <name>` when it starts with a hex number directly
//! followed by a space, so a bare name such as `1 2 3` is read as hash `1` with name `2 3`.

use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use derive_more::derive::Deref;
use tracing::{debug, warn};

use crate::{error::Result, hash::hash64, types::HashBits};

/// File name the dictionary is looked up under by default
pub const DEFAULT_FILE_NAME: &str = "hashes.rst.txt";

/// A known key name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Hash truncated to the dictionary's [`HashBits`]
    pub hash: u64,

    /// Raw bytes of the name
    pub name: Vec<u8>,
}

impl DictionaryEntry {
    /// Parse a single dictionary line.
    ///
    /// One trailing `\n` and then one trailing `\r` are removed first.
    pub fn parse(line: &[u8], hash_bits: HashBits) -> DictionaryEntry {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let (hash, name) = match parse_hex_prefix(line) {
            Some((hash, rest @ [b' ', ..])) => {
                let start = rest.iter().position(|&b| b != b' ').unwrap_or(rest.len());
                (hash, &rest[start..])
            }
            _ => (hash64(line), line),
        };

        DictionaryEntry {
            hash: hash_bits.hash_of(hash),
            name: name.to_vec(),
        }
    }

    /// The name, with invalid UTF-8 replaced
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// Known key names sorted by hash
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct Dictionary {
    hash_bits: HashBits,
    #[deref]
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Build a dictionary from lines of a dictionary file.
    ///
    /// Hashes are truncated to `hash_bits`, which has to match the RST file the
    /// dictionary is used with.
    pub fn from_lines<I, L>(lines: I, hash_bits: HashBits) -> Dictionary
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut entries = lines
            .into_iter()
            .map(|line| DictionaryEntry::parse(line.as_ref(), hash_bits))
            .collect::<Vec<_>>();

        // stable, so the first of several equal hashes stays first
        entries.sort_by_key(|e| e.hash);

        debug!(entries = entries.len(), %hash_bits, "loaded dictionary");
        Dictionary { hash_bits, entries }
    }

    /// Read a dictionary from a stream of lines
    pub fn from_reader<R: BufRead>(reader: R, hash_bits: HashBits) -> Result<Dictionary> {
        let lines = reader.split(b'\n').collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self::from_lines(lines, hash_bits))
    }

    /// Read a dictionary file from disk
    pub fn open(path: impl AsRef<Path>, hash_bits: HashBits) -> Result<Dictionary> {
        Self::from_reader(BufReader::new(File::open(path)?), hash_bits)
    }

    /// Read a dictionary file from disk, logging a warning instead of failing.
    ///
    /// Without a dictionary every key is written as its numeric hash.
    pub fn open_or_warn(path: impl AsRef<Path>, hash_bits: HashBits) -> Option<Dictionary> {
        let path = path.as_ref();
        match Self::open(path, hash_bits) {
            Ok(dictionary) => Some(dictionary),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unable to load hash dictionary");
                None
            }
        }
    }

    /// Width the hashes of this dictionary were truncated to
    pub fn hash_bits(&self) -> HashBits {
        self.hash_bits
    }

    /// Find the entry for a hash, preferring the earliest line on duplicates
    pub fn get(&self, hash: u64) -> Option<&DictionaryEntry> {
        let hash = self.hash_bits.hash_of(hash);
        let index = self.entries.partition_point(|e| e.hash < hash);
        self.entries.get(index).filter(|e| e.hash == hash)
    }

    /// Find the name for a hash
    pub fn name_of(&self, hash: u64) -> Option<&[u8]> {
        self.get(hash).map(|e| e.name.as_slice())
    }
}

/// Read a leading hex number with the leniency of C's `strtoull(_, _, 16)`.
///
/// Returns `None` when no digit was consumed, otherwise the value and the unread rest.
fn parse_hex_prefix(input: &[u8]) -> Option<(u64, &[u8])> {
    let start = input
        .iter()
        .position(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r'))
        .unwrap_or(input.len());
    let mut digits = &input[start..];

    let negative = match digits {
        [b'-', rest @ ..] => {
            digits = rest;
            true
        }
        [b'+', rest @ ..] => {
            digits = rest;
            false
        }
        _ => false,
    };

    if let [b'0', b'x' | b'X', next, ..] = digits {
        if next.is_ascii_hexdigit() {
            digits = &digits[2..];
        }
    }

    let count = digits.iter().take_while(|b| b.is_ascii_hexdigit()).count();
    if count == 0 {
        return None;
    }

    let mut value = 0u64;
    let mut overflowed = false;
    for &b in &digits[..count] {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            _ => b - b'A' + 10,
        };
        match value.checked_mul(16).and_then(|v| v.checked_add(digit as u64)) {
            Some(v) => value = v,
            None => overflowed = true,
        }
    }

    // overflow saturates regardless of sign
    if overflowed {
        return Some((u64::MAX, &digits[count..]));
    }
    if negative {
        value = value.wrapping_neg();
    }

    Some((value, &digits[count..]))
}
