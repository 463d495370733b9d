use std::collections::VecDeque;
use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    Read,
};
use std::path::Path;

use log::debug;

use super::builder::GtfParser;
use super::config::ParserConfig;
use crate::data_structs::Item;
use crate::error::{
    GtfError,
    GtfResult,
};

/// Pulls lines from a [`BufRead`] source through a [`GtfParser`] and yields
/// records as soon as the parser emits them.
///
/// Iteration stops after the first error.
pub struct GtfReader<R: BufRead> {
    source:        R,
    parser:        GtfParser<VecDeque<Item>>,
    buffer:        String,
    pending_error: Option<GtfError>,
    done:          bool,
}

impl<R: BufRead> GtfReader<R> {
    pub fn new(
        source: R,
        config: ParserConfig,
    ) -> GtfResult<Self> {
        Ok(Self {
            source,
            parser: GtfParser::new(config, VecDeque::new())?,
            buffer: String::new(),
            pending_error: None,
            done: false,
        })
    }

    pub fn parser(&self) -> &GtfParser<VecDeque<Item>> { &self.parser }

    pub fn line_number(&self) -> usize { self.parser.line_number() }

    /// Reads one more line, or finishes the parser at end of input.
    fn advance(&mut self) {
        self.buffer.clear();
        let result = match self.source.read_line(&mut self.buffer) {
            Ok(0) => {
                self.done = true;
                self.parser.finish()
            },
            Ok(_) => self.parser.add_line(&self.buffer),
            Err(e) => {
                self.done = true;
                Err(GtfError::Io {
                    line:   self.parser.line_number() + 1,
                    reason: e.to_string(),
                })
            },
        };
        if let Err(err) = result {
            self.done = true;
            self.pending_error = Some(err);
        }
    }
}

impl GtfReader<BufReader<Box<dyn Read>>> {
    /// Opens `path`, decompressing `.gz` files when the `compression`
    /// feature is enabled.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        config: ParserConfig,
    ) -> GtfResult<Self> {
        let path = path.as_ref();
        let io_error = |reason: String| GtfError::Io { line: 0, reason };
        let handle = File::open(path)
            .map_err(|e| io_error(format!("{}: {}", path.display(), e)))?;

        #[cfg(feature = "compression")]
        let source: Box<dyn Read> = {
            let compression = crate::io::compression::Compression::from_path(path);
            debug!(
                "Opening {} (compression: {})",
                path.display(),
                compression.name()
            );
            compression
                .get_decoder(handle)
                .map_err(|e| io_error(e.to_string()))?
        };
        #[cfg(not(feature = "compression"))]
        let source: Box<dyn Read> = {
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
            {
                return Err(io_error(format!(
                    "{}: reading gzip input requires the `compression` feature",
                    path.display()
                )));
            }
            debug!("Opening {}", path.display());
            Box::new(handle)
        };

        Self::new(BufReader::new(source), config)
    }
}

impl<R: BufRead> Iterator for GtfReader<R> {
    type Item = GtfResult<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.parser.emitter_mut().pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return self.pending_error.take().map(Err);
            }
            self.advance();
        }
    }
}

/// Parses a whole document held in memory.
pub fn parse_str(
    text: &str,
    config: ParserConfig,
) -> GtfResult<Vec<Item>> {
    let mut parser = GtfParser::new(config, Vec::new())?;
    for line in text.lines() {
        parser.add_line(line)?;
    }
    parser.finish()?;
    Ok(parser.into_emitter())
}
