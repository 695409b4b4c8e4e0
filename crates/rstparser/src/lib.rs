use clap::Parser;

pub mod commands;

/// Convert RST string tables into readable text
///
/// Without a subcommand, arguments are handled as by `decode`.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<commands::Commands>,

    #[command(flatten)]
    decode: Option<commands::decode::DecodeArgs>,
}

impl Cli {
    pub fn handle(&self) -> miette::Result<()> {
        match (&self.command, &self.decode) {
            (Some(command), _) => command.handle(),
            (None, Some(decode)) => decode.handle(),
            (None, None) => Err(miette::miette!(
                "an input file is needed, try `rstparser path/to/input.rst [path/to/output.txt]`"
            )),
        }
    }
}
