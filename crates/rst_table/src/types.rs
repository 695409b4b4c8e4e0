//! Base types for structure of RST file.

use std::borrow::Cow;

use derive_more::derive::{Constructor, Display};

use crate::error::Error;

/// Layout revision of an RST file, stored in the byte after the magic.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RstVersion {
    /// Optional font configuration block follows the version byte
    #[display("2")]
    V2 = 2,
    #[display("3")]
    V3 = 3,
    #[display("4")]
    V4 = 4,
    /// Drops the padding byte after the entry table
    #[display("5")]
    V5 = 5,
}

impl RstVersion {
    /// Number of low bits of each packed entry holding the key hash
    pub const fn hash_bits(self) -> HashBits {
        match self {
            RstVersion::V2 | RstVersion::V3 => HashBits::Forty,
            RstVersion::V4 | RstVersion::V5 => HashBits::ThirtyNine,
        }
    }

    /// Whether a single padding byte sits between the entry table and the data block
    pub const fn has_padding(self) -> bool {
        (self as u8) < 5
    }
}

impl TryFrom<u8> for RstVersion {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(RstVersion::V2),
            3 => Ok(RstVersion::V3),
            4 => Ok(RstVersion::V4),
            5 => Ok(RstVersion::V5),
            v => Err(Error::UnsupportedVersion(v)),
        }
    }
}

impl From<RstVersion> for u8 {
    fn from(value: RstVersion) -> Self {
        value as u8
    }
}

/// Split of a packed entry into data offset (high bits) and key hash (low bits)
///
/// The same width is used for the shift and for the mask, so every access to a
/// packed value should go through [`HashBits::offset_of`] and [`HashBits::hash_of`].
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HashBits {
    #[display("39")]
    ThirtyNine,
    #[display("40")]
    Forty,
}

impl HashBits {
    /// Width of the hash in bits
    pub const fn bits(self) -> u32 {
        match self {
            HashBits::ThirtyNine => 39,
            HashBits::Forty => 40,
        }
    }

    /// Mask selecting the hash bits
    pub const fn mask(self) -> u64 {
        (1u64 << self.bits()) - 1
    }

    /// Byte offset into the data block
    pub const fn offset_of(self, packed: u64) -> u64 {
        packed >> self.bits()
    }

    /// Key hash truncated to this width
    pub const fn hash_of(self, packed: u64) -> u64 {
        packed & self.mask()
    }
}

/// A single string of the table
#[derive(Constructor, Debug, Clone, PartialEq, Eq)]
pub struct RstEntry {
    /// Data offset and key hash as stored in the file
    pub packed: u64,

    /// Raw bytes of the string, without the terminating NUL
    pub string: Vec<u8>,
}

impl RstEntry {
    /// Offset of the string inside the data block
    pub fn offset(&self, hash_bits: HashBits) -> u64 {
        hash_bits.offset_of(self.packed)
    }

    /// Key hash of this entry
    pub fn hash(&self, hash_bits: HashBits) -> u64 {
        hash_bits.hash_of(self.packed)
    }

    /// The string, with invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.string)
    }
}
