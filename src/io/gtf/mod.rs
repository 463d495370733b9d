//! Streaming GTF parsing.
//!
//! Lines flow through the [`classify`] step into either the pass-through
//! records (directives, comments, FASTA sequences) or the feature builder.
//! The builder keeps every feature that could still be referenced in an
//! arena, links lines by their `transcript_id`, `Parent`, `Derives_from` and
//! configured reference attributes, and emits each fully resolved root once.
//!
//! - [`GtfParser`]: push-style parser over any [`Emitter`].
//! - [`GtfReader`]: pull-style iterator over a buffered reader or a file.
//! - [`parse_str`]: parses a whole string into a list of [`crate::Item`]s.

mod builder;
mod classify;
mod config;
mod emitter;
mod orphans;
mod reader;
mod refs;
mod state;
pub mod tokenizer;


pub use builder::GtfParser;
pub use classify::{
    classify,
    LineClass,
};
pub use config::{
    ParserConfig,
    BUFFER_SIZE_ENV,
    DEFAULT_BUFFER_SIZE,
};
pub use emitter::{
    Emitter,
    FnEmitter,
};
pub use reader::{
    parse_str,
    GtfReader,
};
pub use refs::{
    FeatureId,
    Relation,
    DERIVES_FROM_ATTR,
    ID_ATTR,
    PARENT_ATTR,
    TRANSCRIPT_ID_ATTR,
    TRANSCRIPT_TYPE,
};
pub use state::ParserStatus;
