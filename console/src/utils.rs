use clap::Args;
use gtfstream::exports::log::LevelFilter;
use gtfstream::exports::pretty_env_logger;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)."
    )]
    pub verbose:  u8,
    #[arg(
        long,
        default_value_t = false,
        global = true,
        help = "Display a spinner with the number of processed records."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> { init_logger(self.verbose) }

    pub fn spinner(&self) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_spinner()
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

/// `RUST_LOG` takes precedence when no `-v` flag is given.
pub(crate) fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    if verbose == 0 {
        match std::env::var("RUST_LOG") {
            Ok(filters) => builder.parse_filters(&filters),
            Err(_) => builder.filter_level(LevelFilter::Warn),
        };
    }
    else {
        builder.filter_level(match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    builder.try_init()?;
    Ok(())
}

pub(crate) fn init_spinner() -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos:>8.green} records {msg}")?,
    );
    spinner.set_message("Processing...");
    Ok(spinner)
}
