//! Types for reading RST files
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::{
    fs::File,
    io::{BufReader, Cursor, ErrorKind, Read, Seek, SeekFrom},
    path::Path,
};
use tracing::{debug, instrument, trace};

use crate::{
    error::{Error, Result},
    types::{HashBits, RstEntry, RstVersion},
};

/// Smallest possible file: magic, version, entry count and one more byte
const MIN_FILE_SIZE: u64 = 9;

const MAGIC: &[u8; 3] = b"RST";

/// RST file reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_entries(reader: impl Read + Seek) -> rst_table::error::Result<()> {
///     let rst = rst_table::RstFile::new(reader)?;
///
///     for entry in rst.entries() {
///         println!("{}: {}", entry.hash(rst.hash_bits()), entry.text());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RstFile {
    version: RstVersion,
    font_config: Option<Vec<u8>>,
    entries: Vec<RstEntry>,
}

impl RstFile {
    /// Read an RST file and extract all of its strings.
    ///
    /// Nothing is returned unless every entry could be resolved against the data block.
    #[instrument(skip(reader))]
    pub fn new<R: Read + Seek>(mut reader: R) -> Result<RstFile> {
        let size = reader.seek(SeekFrom::End(0))?;
        reader.rewind()?;

        if size < MIN_FILE_SIZE {
            return Err(Error::Truncated);
        }

        Self::parse(&mut reader, size).map_err(|e| match e {
            Error::IOError(io) if io.kind() == ErrorKind::UnexpectedEof => Error::Truncated,
            e => e,
        })
    }

    /// Read an RST file from memory
    pub fn from_bytes(data: &[u8]) -> Result<RstFile> {
        Self::new(Cursor::new(data))
    }

    /// Open and read an RST file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<RstFile> {
        Self::new(BufReader::new(File::open(path)?))
    }

    fn parse<R: Read + Seek>(reader: &mut R, size: u64) -> Result<RstFile> {
        let mut magic = [0u8; 3];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::InvalidMagic);
        }

        let version = RstVersion::try_from(reader.read_u8()?)?;
        let hash_bits = version.hash_bits();

        // version 2 has a flag byte, the block itself is optional
        let font_config = if version == RstVersion::V2 && reader.read_u8()? > 0 {
            let length = reader.read_u32::<LittleEndian>()? as u64;
            Some(read_block(reader, size, length)?)
        } else {
            None
        };

        let count = reader.read_u32::<LittleEndian>()? as u64;
        let table_block = read_block(reader, size, count * 8)?;
        let mut table = table_block.as_slice();

        let mut packed = Vec::with_capacity(count as usize);
        for _ in 0..count {
            packed.push(table.read_u64::<LittleEndian>()?);
        }

        if version.has_padding() {
            reader.seek(SeekFrom::Current(1))?;
        }

        let mut blob = Vec::with_capacity(size.saturating_sub(reader.stream_position()?) as usize);
        reader.read_to_end(&mut blob)?;

        debug!(
            %version,
            %hash_bits,
            entries = count,
            font_config = font_config.as_ref().map(Vec::len),
            data = blob.len(),
            "read rst header"
        );

        let entries = packed
            .into_iter()
            .map(|packed| extract_entry(&blob, hash_bits, packed))
            .collect::<Result<Vec<_>>>()?;

        Ok(RstFile {
            version,
            font_config,
            entries,
        })
    }

    /// Layout version of this file
    pub fn version(&self) -> RstVersion {
        self.version
    }

    /// Width of the key hashes in this file
    pub fn hash_bits(&self) -> HashBits {
        self.version.hash_bits()
    }

    /// Raw font configuration block, only present in version 2 files
    pub fn font_config(&self) -> Option<&[u8]> {
        self.font_config.as_deref()
    }

    /// Number of entries contained in this RST.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this RST contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in the order they are stored in the file
    pub fn entries(&self) -> &[RstEntry] {
        &self.entries
    }

    /// Try to get the first entry with the given key hash
    pub fn by_hash(&self, hash: u64) -> Option<&RstEntry> {
        let hash_bits = self.hash_bits();
        let hash = hash_bits.hash_of(hash);
        self.entries.iter().find(|e| e.hash(hash_bits) == hash)
    }
}

impl<'a> IntoIterator for &'a RstFile {
    type Item = &'a RstEntry;
    type IntoIter = std::slice::Iter<'a, RstEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read `length` bytes, refusing lengths that run past the end of the file
fn read_block<R: Read + Seek>(reader: &mut R, size: u64, length: u64) -> Result<Vec<u8>> {
    let remaining = size.saturating_sub(reader.stream_position()?);
    if length > remaining {
        return Err(Error::Truncated);
    }

    let mut buffer = vec![0u8; length as usize];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Copy the NUL terminated string an entry points at out of the data block
fn extract_entry(blob: &[u8], hash_bits: HashBits, packed: u64) -> Result<RstEntry> {
    let offset = hash_bits.offset_of(packed);
    if offset >= blob.len() as u64 {
        debug!(offset, data = blob.len(), "entry points outside of data");
        return Err(Error::Truncated);
    }

    let tail = &blob[offset as usize..];
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    trace!(offset, hash = hash_bits.hash_of(packed), length = end, "extracted entry");

    Ok(RstEntry::new(packed, tail[..end].to_vec()))
}
