pub mod decode;
pub mod info;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Convert an RST file into a text file
    Decode(decode::DecodeArgs),
    /// Show the header of an RST file
    Info(info::InfoArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Decode(decode) => decode.handle(),
            Commands::Info(info) => info.handle(),
        }
    }
}
