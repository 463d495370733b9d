use log::warn;

use super::refs::{
    DERIVES_FROM_ATTR,
    ID_ATTR,
    PARENT_ATTR,
    TRANSCRIPT_ID_ATTR,
};
use crate::data_structs::ItemKind;
use crate::error::{
    GtfError,
    GtfResult,
};
use crate::{
    getter_fn,
    with_field_fn,
};

pub const DEFAULT_BUFFER_SIZE: usize = 1000;
pub const BUFFER_SIZE_ENV: &str = "GTFSTREAM_BUFFER_SIZE";

/// Options of a single parse run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of top-level features held back waiting for
    /// references. Older features are emitted early once it is exceeded.
    buffer_size:                    usize,
    parse_features:                 bool,
    parse_directives:               bool,
    parse_comments:                 bool,
    parse_sequences:                bool,
    disable_derives_from_references: bool,
    /// Extra attribute names treated as references to other features.
    reference_attributes:           Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            buffer_size:                    DEFAULT_BUFFER_SIZE,
            parse_features:                 true,
            parse_directives:               false,
            parse_comments:                 false,
            parse_sequences:                true,
            disable_derives_from_references: false,
            reference_attributes:           Vec::new(),
        }
    }
}

impl ParserConfig {
    with_field_fn!(buffer_size, usize);

    with_field_fn!(parse_features, bool);

    with_field_fn!(parse_directives, bool);

    with_field_fn!(parse_comments, bool);

    with_field_fn!(parse_sequences, bool);

    with_field_fn!(disable_derives_from_references, bool);

    with_field_fn!(reference_attributes, Vec<String>);

    getter_fn!(buffer_size, usize);

    getter_fn!(disable_derives_from_references, bool);

    getter_fn!(reference_attributes, Vec<String>);

    /// Emit every record kind.
    pub fn parse_all(mut self) -> Self {
        self.parse_features = true;
        self.parse_directives = true;
        self.parse_comments = true;
        self.parse_sequences = true;
        self
    }

    /// Default options with the buffer size taken from
    /// `GTFSTREAM_BUFFER_SIZE` when it is set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(BUFFER_SIZE_ENV) {
            Ok(value) => {
                match value.parse::<usize>() {
                    Ok(size) => config.with_buffer_size(size),
                    Err(_) => {
                        warn!(
                            "Ignoring {}='{}': not a positive integer",
                            BUFFER_SIZE_ENV, value
                        );
                        config
                    },
                }
            },
            Err(_) => config,
        }
    }

    /// Whether items of `kind` are handed to the emitter.
    pub fn selects(
        &self,
        kind: ItemKind,
    ) -> bool {
        match kind {
            ItemKind::Feature => self.parse_features,
            ItemKind::Directive => self.parse_directives,
            ItemKind::Comment => self.parse_comments,
            ItemKind::Sequence => self.parse_sequences,
        }
    }

    pub fn validate(&self) -> GtfResult<()> {
        if self.buffer_size == 0 {
            return Err(GtfError::InvalidConfig(
                "buffer size must be at least 1".to_string(),
            ));
        }
        for name in self.reference_attributes.iter() {
            if name.trim().is_empty() {
                return Err(GtfError::InvalidConfig(
                    "reference attribute names must not be empty".to_string(),
                ));
            }
            if [PARENT_ATTR, DERIVES_FROM_ATTR, ID_ATTR, TRANSCRIPT_ID_ATTR]
                .contains(&name.as_str())
            {
                return Err(GtfError::InvalidConfig(format!(
                    "'{}' is already handled and cannot be used as an extra \
                     reference attribute",
                    name
                )));
            }
            let container = name.to_lowercase();
            if container == "child_features" || container == "derived_features" {
                return Err(GtfError::InvalidConfig(format!(
                    "reference attribute '{}' collides with a built-in container",
                    name
                )));
            }
        }
        Ok(())
    }
}
