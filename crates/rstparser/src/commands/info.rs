use clap::Args;
use miette::{Context, Result};
use owo_colors::OwoColorize;
use rst_table::{Dictionary, RstFile};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input RST file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Dictionary to count resolvable keys with
    #[arg(long, value_name = "FILE")]
    hashes: Option<PathBuf>,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let rst = RstFile::open(&self.input)
            .context(format!("reading {}", &self.input.display()))?;

        println!("{}", self.input.display().bold());
        println!("  {:<12} {}", "version".cyan(), rst.version());
        println!("  {:<12} {}", "hash bits".cyan(), rst.hash_bits());
        println!("  {:<12} {}", "entries".cyan(), rst.len());
        match rst.font_config() {
            Some(font_config) => {
                println!("  {:<12} {} bytes", "font config".cyan(), font_config.len())
            }
            None => println!("  {:<12} {}", "font config".cyan(), "none".dimmed()),
        }

        if let Some(hashes) = &self.hashes {
            let dictionary = Dictionary::open(hashes, rst.hash_bits())
                .context(format!("reading {}", hashes.display()))?;
            let named = rst
                .resolve(Some(&dictionary))
                .entries()
                .filter(|e| e.key.is_name())
                .count();

            println!(
                "  {:<12} {} of {} ({} known names)",
                "resolved".cyan(),
                named.green(),
                rst.len(),
                dictionary.len()
            );
        }

        Ok(())
    }
}
