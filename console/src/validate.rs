use std::path::PathBuf;
use std::process::exit;

use clap::Args;
use console::style;
use gtfstream::prelude::*;
use itertools::Itertools;

use crate::strings::validate as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct ValidateArgs {
    #[arg(value_parser, required = true, help = strings::FILE)]
    file: PathBuf,
}

impl ValidateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if !self.file.is_file() {
            eprintln!("Path {} is not a file.", style(self.file.display()).red());
            exit(-1);
        }

        let reader = GtfReader::from_path(&self.file, ParserConfig::from_env().parse_all())?;
        let spinner = utils.spinner()?;

        let mut counts = Vec::new();
        let mut nested = 0usize;
        for item in reader {
            match item {
                Ok(item) => {
                    if let Some(feature) = item.as_feature() {
                        nested += feature.subtree_size() - 1;
                    }
                    counts.push(item.kind());
                    spinner.inc(1);
                },
                Err(err) => {
                    spinner.abandon();
                    eprintln!("[{}] {}", style("X").red(), style(&err).red());
                    exit(-1);
                },
            }
        }
        spinner.finish_and_clear();

        println!(
            "[{}] {} is valid",
            style("V").green(),
            style(self.file.display()).green()
        );
        for (kind, n) in counts
            .into_iter()
            .counts()
            .into_iter()
            .sorted()
        {
            println!("\t{}: {}", kind, style(n).green());
        }
        println!("\tnested features: {}", style(nested).green());
        Ok(())
    }
}
