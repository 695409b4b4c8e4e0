//! Resolving hashed keys of an RST file to names.

use std::{borrow::Cow, fmt};

use tracing::warn;

use crate::{
    dictionary::Dictionary,
    read::RstFile,
    types::{HashBits, RstEntry},
};

/// Key of an entry after looking it up in a [`Dictionary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKey<'a> {
    /// Name found in the dictionary
    Name(&'a [u8]),

    /// Truncated hash, when no name is known
    Hash(u64),
}

impl ResolvedKey<'_> {
    /// Whether a name was found for this key
    pub fn is_name(&self) -> bool {
        matches!(self, ResolvedKey::Name(_))
    }

    /// The key as text, names with invalid UTF-8 replaced and hashes in decimal
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            ResolvedKey::Name(name) => String::from_utf8_lossy(name),
            ResolvedKey::Hash(hash) => Cow::Owned(hash.to_string()),
        }
    }
}

impl fmt::Display for ResolvedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// An entry with its key looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEntry<'a> {
    /// Key hash truncated to the file's hash bits
    pub hash: u64,
    pub key: ResolvedKey<'a>,
    /// Raw string of the entry
    pub value: &'a [u8],
}

/// Looks up entry keys of a file with a given hash width
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    hash_bits: HashBits,
    dictionary: Option<&'a Dictionary>,
}

impl<'a> Resolver<'a> {
    pub fn new(hash_bits: HashBits, dictionary: Option<&'a Dictionary>) -> Resolver<'a> {
        if let Some(dictionary) = dictionary {
            if dictionary.hash_bits() != hash_bits {
                warn!(
                    file = %hash_bits,
                    dictionary = %dictionary.hash_bits(),
                    "dictionary was loaded for a different hash width"
                );
            }
        }

        Resolver {
            hash_bits,
            dictionary,
        }
    }

    /// Resolve a single entry, falling back to its numeric hash
    pub fn resolve(&self, entry: &'a RstEntry) -> ResolvedEntry<'a> {
        let hash = entry.hash(self.hash_bits);
        let key = self
            .dictionary
            .and_then(|d| d.name_of(hash))
            .map_or(ResolvedKey::Hash(hash), ResolvedKey::Name);

        ResolvedEntry {
            hash,
            key,
            value: &entry.string,
        }
    }
}

/// An [`RstFile`] paired with the dictionary its keys are resolved with
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFile<'a> {
    file: &'a RstFile,
    resolver: Resolver<'a>,
}

impl<'a> ResolvedFile<'a> {
    pub fn new(file: &'a RstFile, dictionary: Option<&'a Dictionary>) -> ResolvedFile<'a> {
        ResolvedFile {
            file,
            resolver: Resolver::new(file.hash_bits(), dictionary),
        }
    }

    /// The underlying file
    pub fn file(&self) -> &'a RstFile {
        self.file
    }

    /// Resolved entries, in file order
    pub fn entries(&self) -> impl Iterator<Item = ResolvedEntry<'a>> + 'a {
        let resolver = self.resolver;
        self.file.entries().iter().map(move |e| resolver.resolve(e))
    }
}

impl RstFile {
    /// Pair this file with a dictionary for resolving its keys
    pub fn resolve<'a>(&'a self, dictionary: Option<&'a Dictionary>) -> ResolvedFile<'a> {
        ResolvedFile::new(self, dictionary)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::dictionary::Dictionary;
    use crate::error::Result;
    use crate::read::RstFile;
    use crate::resolve::{ResolvedEntry, ResolvedKey};
    use crate::types::HashBits;

    fn sample() -> Result<RstFile> {
        #[rustfmt::skip]
        let input = vec![
            b'R', b'S', b'T', 0x03,
            0x03, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00,
            0x00,
            b'o', b'n', 0x00, b'o', b'f', b'f', 0x00,
        ];
        RstFile::from_bytes(&input)
    }

    #[test]
    fn resolve_keeps_file_order() -> Result<()> {
        let rst = sample()?;
        let dictionary = Dictionary::from_lines(["2 two", "1 one"], HashBits::Forty);

        let resolved = rst.resolve(Some(&dictionary)).entries().collect::<Vec<_>>();
        assert_eq!(
            resolved,
            vec![
                ResolvedEntry {
                    hash: 3,
                    key: ResolvedKey::Hash(3),
                    value: b"off",
                },
                ResolvedEntry {
                    hash: 1,
                    key: ResolvedKey::Name(b"one"),
                    value: b"on",
                },
                ResolvedEntry {
                    hash: 2,
                    key: ResolvedKey::Name(b"two"),
                    value: b"off",
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn resolve_without_dictionary() -> Result<()> {
        let rst = sample()?;

        let keys = rst
            .resolve(None)
            .entries()
            .map(|e| e.key.to_string())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["3", "1", "2"]);
        assert!(rst.resolve(None).entries().all(|e| !e.key.is_name()));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn warn_on_mismatched_hash_width() -> Result<()> {
        let rst = sample()?;
        assert_eq!(rst.hash_bits(), HashBits::Forty);

        let dictionary = Dictionary::from_lines(["1 one"], HashBits::ThirtyNine);
        let keys = rst
            .resolve(Some(&dictionary))
            .entries()
            .map(|e| e.key)
            .collect::<Vec<_>>();

        assert!(logs_contain("different hash width"));
        assert_eq!(keys[1], ResolvedKey::Name(b"one"));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn matching_hash_width_is_quiet() -> Result<()> {
        let rst = sample()?;
        let dictionary = Dictionary::from_lines(["1 one"], rst.hash_bits());
        let _ = rst.resolve(Some(&dictionary));

        assert!(!logs_contain("different hash width"));

        Ok(())
    }
}
