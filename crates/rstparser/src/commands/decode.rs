use clap::{Args, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use rst_table::{
    dictionary::DEFAULT_FILE_NAME,
    write::{Escaping, OutputFormat, RstWriterOptions},
    Dictionary, RstFile, RstWriter,
};
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `tr "<key>" = "<string>"` lines
    #[default]
    Text,
    /// A JSON document
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Text => ".txt",
            Format::Json => ".json",
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args)]
pub struct DecodeArgs {
    /// An input RST file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// The target file, defaults to the input path with the format's extension appended
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Dictionary of known key names
    #[arg(long, value_name = "FILE", default_value = DEFAULT_FILE_NAME)]
    hashes: PathBuf,

    /// Escape quotes and backslashes in keys and strings
    #[arg(long, default_value_t = false)]
    escape: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

impl DecodeArgs {
    pub fn handle(&self) -> Result<()> {
        let rst = RstFile::open(&self.input)
            .context(format!("reading {}", &self.input.display()))?;
        info!(
            "read {} entries from {} (version {})",
            rst.len(),
            self.input.display(),
            rst.version()
        );

        let dictionary = Dictionary::open_or_warn(&self.hashes, rst.hash_bits());

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, self.format));
        info!("writing {}", output.display());

        let out = File::create(&output)
            .into_diagnostic()
            .context(format!("creating {}", &output.display()))?;

        let mut writer = RstWriter::new(
            BufWriter::new(out),
            RstWriterOptions::builder()
                .escaping(if self.escape {
                    Escaping::Backslash
                } else {
                    Escaping::Raw
                })
                .format(self.format.into())
                .build(),
        );
        writer
            .write(&rst.resolve(dictionary.as_ref()))
            .context(format!("writing {}", &output.display()))?;

        Ok(())
    }
}

/// Input path with the format's extension appended, `menu.rst` becomes `menu.rst.txt`
fn default_output(input: &Path, format: Format) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(format.extension());
    path.into()
}
