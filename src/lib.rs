//! # gtfstream
//!
//! `gtfstream` is a streaming parser for GTF gene annotations. It reads an
//! annotation line by line and hands back fully resolved feature records:
//! exons and CDS lines nested under their transcripts, discontinuous
//! features merged into one record, and `Derives_from` targets collected
//! under the features they derive from.
//!
//! GTF links lines through `transcript_id`, and files often omit the
//! transcript lines themselves. A transcript record is synthesized for
//! every `transcript_id` that has no declared transcript, so every exon
//! ends up with an ancestor. Explicit GFF3-style `ID`, `Parent` and
//! `Derives_from` attributes are honoured as well.
//!
//! Memory is bounded by a limit on buffered top-level features. The oldest
//! ones are emitted early once it is exceeded, and `###` lines close a scope
//! so everything in it can be emitted. A reference that never resolves
//! during its scope is a fatal error.
//!
//! The buffer limit can also be set with the `GTFSTREAM_BUFFER_SIZE`
//! environment variable, see [`ParserConfig::from_env`].
//!
//! ## Structure
//!
//! * [`data_structs`]: records produced by the parser ([`Feature`],
//!   [`FeatureLine`], [`Item`], ...).
//! * [`io`]: the parser itself, its configuration, and the file reader.
//! * [`error`]: [`GtfError`], the fatal conditions of a parse run.
//! * [`utils`]: helper macros.
//!
//! ## Usage
//!
//! ### Parsing a string
//!
//! ```
//! use gtfstream::prelude::*;
//!
//! let text = "ctgA\texample\texon\t1050\t1500\t.\t+\t.\ttranscript_id \"EDEN.1\"; gene_id \"EDEN\";";
//! let items = parse_str(text, ParserConfig::default()).unwrap();
//!
//! let transcript = items[0].as_feature().unwrap();
//! assert_eq!(transcript.feature_type(), Some("transcript"));
//! assert_eq!(transcript.children().len(), 1);
//! ```
//!
//! ### Streaming a file
//!
//! ```no_run
//! use gtfstream::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = GtfReader::from_path("annotation.gtf", ParserConfig::default())?;
//!     for item in reader {
//!         if let Item::Feature(feature) = item? {
//!             println!("{:?} with {} line(s)", feature.feature_type(), feature.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod prelude;
pub mod utils;

pub use crate::data_structs::{
    Comment,
    Directive,
    Feature,
    FeatureLine,
    Item,
    ItemKind,
    Sequence,
    Strand,
};
pub use crate::error::{
    DanglingRef,
    GtfError,
    GtfResult,
};
#[cfg(feature = "compression")]
pub use crate::io::compression::Compression;
pub use crate::io::gtf::{
    parse_str,
    Emitter,
    FnEmitter,
    GtfParser,
    GtfReader,
    ParserConfig,
};
