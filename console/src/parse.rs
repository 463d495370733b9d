use std::fs::File;
use std::io::{
    stdout,
    BufWriter,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::{
    Args,
    ValueEnum,
};
use gtfstream::prelude::*;
use log::info;

use crate::strings::parse as strings;
use crate::utils::UtilsArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Gtf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ParseArgs {
    #[arg(value_parser, required = true, help = strings::FILE)]
    file:                 PathBuf,
    #[arg(short, long, help = strings::OUTPUT)]
    output:               Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, help = strings::FORMAT)]
    format:               OutputFormat,
    #[arg(short, long = "buffer-size", help = strings::BUFFER_SIZE)]
    buffer_size:          Option<usize>,
    #[arg(long, default_value_t = false, help = strings::DIRECTIVES)]
    directives:           bool,
    #[arg(long, default_value_t = false, help = strings::COMMENTS)]
    comments:             bool,
    #[arg(long = "no-sequences", default_value_t = false, help = strings::NO_SEQUENCES)]
    no_sequences:         bool,
    #[arg(long, default_value_t = false, help = strings::ALL)]
    all:                  bool,
    #[arg(long = "no-derives", default_value_t = false, help = strings::NO_DERIVES)]
    no_derives:           bool,
    #[arg(long = "reference-attribute", value_delimiter = ',', help = strings::REFERENCE_ATTRIBUTES)]
    reference_attributes: Vec<String>,
}

impl ParseArgs {
    pub fn config(&self) -> ParserConfig {
        let mut config = ParserConfig::from_env()
            .with_parse_directives(self.directives)
            .with_parse_comments(self.comments)
            .with_parse_sequences(!self.no_sequences)
            .with_disable_derives_from_references(self.no_derives)
            .with_reference_attributes(self.reference_attributes.clone());
        if let Some(buffer_size) = self.buffer_size {
            config = config.with_buffer_size(buffer_size);
        }
        if self.all {
            config = config.parse_all();
        }
        config
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let reader = GtfReader::from_path(&self.file, self.config())?;
        let mut sink: Box<dyn Write> = match &self.output {
            Some(path) => {
                Box::new(BufWriter::new(File::create(path).with_context(|| {
                    format!("failed to create {}", path.display())
                })?))
            },
            None => Box::new(BufWriter::new(stdout().lock())),
        };

        let spinner = utils.spinner()?;
        let mut written = 0usize;
        for item in reader {
            let item = item?;
            match self.format {
                OutputFormat::Json => {
                    serde_json::to_writer(&mut sink, &item)?;
                    writeln!(sink)?;
                },
                OutputFormat::Gtf => write_gtf(&item, &mut sink)?,
            }
            written += 1;
            spinner.inc(1);
        }
        sink.flush()?;
        spinner.finish_with_message("Done");
        info!("Wrote {} record(s)", written);
        Ok(())
    }
}

/// Writes an item as it would appear in a GTF file. Nested features follow
/// the line they are attached to.
pub(crate) fn write_gtf<W: Write>(
    item: &Item,
    sink: &mut W,
) -> anyhow::Result<()> {
    match item {
        Item::Feature(feature) => write_feature(feature, sink)?,
        Item::Directive(directive) => {
            match &directive.value {
                Some(value) => writeln!(sink, "##{} {}", directive.directive, value)?,
                None => writeln!(sink, "##{}", directive.directive)?,
            }
        },
        Item::Comment(comment) => writeln!(sink, "# {}", comment.comment)?,
        Item::Sequence(sequence) => {
            match &sequence.description {
                Some(description) => writeln!(sink, ">{} {}", sequence.id, description)?,
                None => writeln!(sink, ">{}", sequence.id)?,
            }
            writeln!(sink, "{}", sequence.sequence)?;
        },
    }
    Ok(())
}

fn write_feature<W: Write>(
    feature: &Feature,
    sink: &mut W,
) -> anyhow::Result<()> {
    for line in feature.iter() {
        writeln!(sink, "{}", line)?;
    }
    for line in feature.iter() {
        for nested in line
            .child_features
            .iter()
            .chain(line.derived_features.iter())
            .chain(line.other_features.values().flatten())
        {
            write_feature(nested, sink)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_gtf_flattens_features() {
        let exon = "ctgA\texample\texon\t1050\t1500\t.\t+\t.\ttranscript_id \"EDEN.1\";";
        let items = parse_str(exon, ParserConfig::default()).unwrap();
        let mut out = Vec::new();
        write_gtf(&items[0], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\ttranscript\t"));
        assert_eq!(lines[1], exon);
    }

    #[test]
    fn test_write_gtf_records() {
        let mut out = Vec::new();
        write_gtf(
            &Item::Directive(Directive::new("gff-version".into(), Some("2".into()))),
            &mut out,
        )
        .unwrap();
        write_gtf(
            &Item::Sequence(Sequence {
                id:          "ctgA".into(),
                description: None,
                sequence:    "ACGT".into(),
            }),
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "##gff-version 2\n>ctgA\nACGT\n");
    }
}
