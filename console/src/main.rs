mod parse;
mod strings;
mod utils;
mod validate;

use clap::{
    Parser,
    Subcommand,
};
use parse::ParseArgs;
use utils::UtilsArgs;
use validate::ValidateArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Resolve a GTF file into nested feature records.
    Parse {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ParseArgs,
    },

    /// Check that every reference of a GTF file resolves.
    Validate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ValidateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Parse { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Validate { utils, args } => {
            utils.setup()?;
            args.run(&utils)?
        },
    }
    Ok(())
}
