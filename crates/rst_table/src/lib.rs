//! This library handles reading **RST** string table files and resolving their hashed keys.
//!
//! # RST Format Documentation
//!
//! An RST file maps hashed keys to strings. Keys are not stored by name, only as a truncated
//! [XXH64](https://xxhash.com) hash, so a separate dictionary of known names is needed to turn
//! them back into something readable (see [`dictionary`]).
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 3 bytes: `RST`                                             |
//! | 0x0003         | Version                | 1 byte: 2, 3, 4 or 5                                       |
//! | 0x0004         | Font Config            | Version 2 only, see below                                  |
//! | var            | Entry Count            | 4 bytes: The number of entries in this file                |
//! | var            | Entries                | 8 bytes per entry: packed offset and key hash              |
//! | var            | Padding                | 1 byte, only for versions below 5                          |
//! | var            | Data                   | NUL terminated strings until the end of the file          |
//!
//! ### Font Config
//!
//! Version 2 files store a 1 byte flag after the version. When it is non-zero, a 4 byte
//! length follows and then that many bytes of font configuration text.
//!
//! ### Entries
//!
//! Each entry is a single 64 bit value. The low bits hold the key hash and the high bits
//! the offset of the entry's string inside the data block:
//!
//! | Version | Hash Bits | Offset      |
//! |---------|-----------|-------------|
//! | 2, 3    | 40        | `value >> 40` |
//! | 4, 5    | 39        | `value >> 39` |
//!
//! Entries may share strings, and the order of the entries is kept when writing them out.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Encoding**: Strings are passed through as raw bytes
//!

pub mod dictionary;
pub mod error;
pub mod hash;
pub mod read;
pub mod resolve;
#[cfg(feature = "serde")]
mod serde;
pub mod types;
pub mod write;

pub use dictionary::Dictionary;
pub use read::RstFile;
pub use types::{HashBits, RstEntry, RstVersion};
pub use write::RstWriter;
