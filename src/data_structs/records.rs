use serde::Serialize;

use crate::data_structs::enums::ItemKind;
use crate::data_structs::feature::Feature;
use crate::data_structs::typedef::PosType;

/// A `##` directive line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub directive: String,
    pub value:     Option<String>,
    #[serde(flatten)]
    pub details:   Option<DirectiveDetails>,
}

/// Decoded payload of the directives with a known structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectiveDetails {
    SequenceRegion {
        seq_id: String,
        start:  PosType,
        end:    PosType,
    },
    GenomeBuild {
        source:     String,
        build_name: String,
    },
}

impl Directive {
    pub fn new(
        directive: String,
        value: Option<String>,
    ) -> Self {
        Self {
            directive,
            value,
            details: None,
        }
    }

    pub fn is(
        &self,
        name: &str,
    ) -> bool {
        self.directive == name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub comment: String,
}

/// A FASTA record from the `##FASTA` section at the end of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub id:          String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sequence:    String,
}

/// Every unit the parser can hand to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Feature(Feature),
    Directive(Directive),
    Comment(Comment),
    Sequence(Sequence),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Feature(_) => ItemKind::Feature,
            Item::Directive(_) => ItemKind::Directive,
            Item::Comment(_) => ItemKind::Comment,
            Item::Sequence(_) => ItemKind::Sequence,
        }
    }

    pub fn as_feature(&self) -> Option<&Feature> {
        match self {
            Item::Feature(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_feature(self) -> Option<Feature> {
        match self {
            Item::Feature(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            Item::Directive(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Item::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Item::Sequence(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Feature> for Item {
    fn from(value: Feature) -> Self { Item::Feature(value) }
}

impl From<Directive> for Item {
    fn from(value: Directive) -> Self { Item::Directive(value) }
}

impl From<Comment> for Item {
    fn from(value: Comment) -> Self { Item::Comment(value) }
}

impl From<Sequence> for Item {
    fn from(value: Sequence) -> Self { Item::Sequence(value) }
}
