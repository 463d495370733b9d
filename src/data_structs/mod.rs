//! This module contains the record types produced by the `gtfstream`
//! parser.
//!
//! Key components of this module include:
//!
//! - [`FeatureLine`]: one tokenized GTF line, carrying the containers
//!   (`child_features`, `derived_features`, ...) that the builder fills when
//!   relationships between lines are resolved.
//! - [`Feature`]: one or more lines sharing an identity, such as a CDS split
//!   across several lines.
//! - [`Item`]: the tagged union of everything the parser emits, together with
//!   the pass-through [`Directive`], [`Comment`] and [`Sequence`] records.
//! - [`typedef`]: type aliases for positions, attributes and identifiers.

mod enums;
mod feature;
mod records;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use enums::{
    ItemKind,
    Strand,
};
pub(crate) use feature::{
    max_pos,
    min_pos,
};
pub use feature::{
    Feature,
    FeatureLine,
};
pub use records::{
    Comment,
    Directive,
    DirectiveDetails,
    Item,
    Sequence,
};
