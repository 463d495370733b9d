use std::fmt::{
    Display,
    Formatter,
};

use arcstr::ArcStr;

use crate::data_structs::typedef::GtfSmallStr;

pub const PARENT_ATTR: &str = "Parent";
pub const DERIVES_FROM_ATTR: &str = "Derives_from";
pub const ID_ATTR: &str = "ID";
pub const TRANSCRIPT_ID_ATTR: &str = "transcript_id";
pub const TRANSCRIPT_TYPE: &str = "transcript";

/// Identity of a feature while it is being built.
///
/// GTF has no native unique id, so lines that carry neither a transcript id
/// nor an explicit `ID` get one from the line counter. The two namespaces
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureId {
    Named(GtfSmallStr),
    Line(usize),
}

impl FeatureId {
    pub fn named(id: &str) -> Self { FeatureId::Named(GtfSmallStr::from(id)) }
}

impl Display for FeatureId {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FeatureId::Named(id) => write!(f, "{}", id),
            FeatureId::Line(n) => write!(f, "{}", n),
        }
    }
}

/// Kind of link an attribute establishes between two features.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `Parent` (and the `transcript_id` convention): fills `child_features`.
    Parent,
    /// `Derives_from`: fills `derived_features`.
    DerivesFrom,
    /// Any other referential attribute, stored under its lower-cased name.
    Other(ArcStr),
}

impl Relation {
    pub fn attribute_name(&self) -> &str {
        match self {
            Relation::Parent => PARENT_ATTR,
            Relation::DerivesFrom => DERIVES_FROM_ATTR,
            Relation::Other(name) => name.as_str(),
        }
    }

    /// Name of the container on the target line that receives the
    /// referencing feature.
    pub fn container_name(&self) -> String {
        match self {
            Relation::Parent => "child_features".to_string(),
            Relation::DerivesFrom => "derived_features".to_string(),
            Relation::Other(name) => name.to_lowercase(),
        }
    }
}

impl Display for Relation {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.attribute_name())
    }
}
