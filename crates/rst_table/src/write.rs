//! Types for writing resolved RST files as text
//!

use bon::Builder;
use std::io::{self, Write};
use tracing::{debug, instrument};

use crate::{
    error::Result,
    resolve::{ResolvedEntry, ResolvedFile, ResolvedKey},
};

/// How quotes inside keys and strings are written
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Escaping {
    /// Write bytes through as they are, even if that produces unbalanced quotes
    #[default]
    Raw,

    /// Prefix `"` and `\` with a backslash
    Backslash,
}

/// Output document format
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `tr "<key>" = "<string>"` line per entry
    #[default]
    Text,

    /// A JSON document with the header fields and all entries
    #[cfg(feature = "serde")]
    Json,
}

/// Options for how the resolved file should be written
#[derive(Debug, Default, Clone, Copy, Builder)]
pub struct RstWriterOptions {
    /// Escaping applied to keys and strings of the text format
    #[builder(default)]
    pub escaping: Escaping,

    /// The document format to produce
    #[builder(default)]
    pub format: OutputFormat,
}

/// Writer for resolved RST files
///
/// ```
/// # fn doit() -> rst_table::error::Result<()>
/// # {
/// use rst_table::{Dictionary, RstFile, RstWriter};
/// use rst_table::write::RstWriterOptions;
///
/// let rst = RstFile::from_bytes(b"RST\x03\x01\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00Hello\x00")?;
/// let dictionary = Dictionary::from_lines(["1 Greeting"], rst.hash_bits());
///
/// let mut out = RstWriter::new(Vec::new(), RstWriterOptions::default());
/// out.write(&rst.resolve(Some(&dictionary)))?;
///
/// assert_eq!(out.into_inner(), b"tr \"Greeting\" = \"Hello\"\n");
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct RstWriter<W: Write> {
    inner: W,
    options: RstWriterOptions,
}

impl<W: Write> RstWriter<W> {
    pub fn new(inner: W, options: RstWriterOptions) -> RstWriter<W> {
        RstWriter { inner, options }
    }

    /// Write the whole file in the configured format
    #[instrument(skip_all, err)]
    pub fn write(&mut self, resolved: &ResolvedFile<'_>) -> Result<()> {
        match self.options.format {
            OutputFormat::Text => self.write_text(resolved)?,
            #[cfg(feature = "serde")]
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.inner, resolved)?;
                self.inner.write_all(b"\n")?;
            }
        }

        self.inner.flush()?;
        Ok(())
    }

    fn write_text(&mut self, resolved: &ResolvedFile<'_>) -> io::Result<()> {
        if let Some(font_config) = resolved.file().font_config() {
            self.inner.write_all(font_config)?;
        }

        let mut named = 0usize;
        for entry in resolved.entries() {
            named += entry.key.is_name() as usize;
            self.write_entry(&entry)?;
        }

        debug!(
            entries = resolved.file().len(),
            named, "wrote text output"
        );
        Ok(())
    }

    fn write_entry(&mut self, entry: &ResolvedEntry<'_>) -> io::Result<()> {
        self.inner.write_all(b"tr \"")?;
        match entry.key {
            ResolvedKey::Name(name) => self.write_field(name)?,
            ResolvedKey::Hash(hash) => write!(self.inner, "{hash}")?,
        }
        self.inner.write_all(b"\" = \"")?;
        self.write_field(entry.value)?;
        self.inner.write_all(b"\"\n")
    }

    fn write_field(&mut self, field: &[u8]) -> io::Result<()> {
        if self.options.escaping == Escaping::Raw {
            return self.inner.write_all(field);
        }

        let mut start = 0;
        for (i, &b) in field.iter().enumerate() {
            if matches!(b, b'"' | b'\\') {
                self.inner.write_all(&field[start..i])?;
                self.inner.write_all(&[b'\\', b])?;
                start = i + 1;
            }
        }
        self.inner.write_all(&field[start..])
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
