use std::fmt;
use std::str::FromStr;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::Serialize;

use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    Attributes,
    PosType,
};
use crate::io::gtf::tokenizer;

/// One tokenized GTF line.
///
/// `child_features`, `derived_features` and `other_features` are empty when
/// the line comes out of the tokenizer; the builder fills them in when the
/// owning [`Feature`] is emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureLine {
    pub seq_id:           Option<ArcStr>,
    pub source:           Option<ArcStr>,
    #[serde(rename = "type")]
    pub feature_type:     Option<ArcStr>,
    pub start:            Option<PosType>,
    pub end:              Option<PosType>,
    pub score:            Option<f64>,
    pub strand:           Option<Strand>,
    pub phase:            Option<u8>,
    pub attributes:       Attributes,
    pub child_features:   Vec<Feature>,
    pub derived_features: Vec<Feature>,
    /// Containers for referential attributes other than `Parent` and
    /// `Derives_from`, keyed by the lower-cased attribute name.
    #[serde(flatten)]
    pub other_features:   IndexMap<String, Vec<Feature>>,
}

impl FeatureLine {
    /// Values of the attribute `name`, or an empty slice.
    pub fn attribute(
        &self,
        name: &str,
    ) -> &[String] {
        self.attributes
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_attribute(
        &self,
        name: &str,
    ) -> bool {
        !self.attribute(name).is_empty()
    }

    pub fn is_type(
        &self,
        feature_type: &str,
    ) -> bool {
        self.feature_type.as_deref() == Some(feature_type)
    }

    pub fn with_feature_type<S: Into<ArcStr>>(
        mut self,
        feature_type: S,
    ) -> Self {
        self.feature_type = Some(feature_type.into());
        self
    }

    pub fn with_attribute<K: Into<String>>(
        mut self,
        key: K,
        values: Vec<String>,
    ) -> Self {
        self.attributes.insert(key.into(), values);
        self
    }

    pub fn without_attribute(
        mut self,
        key: &str,
    ) -> Self {
        self.attributes.shift_remove(key);
        self
    }

    /// Number of features nested in every container of this line.
    pub fn n_nested(&self) -> usize {
        self.child_features.len()
            + self.derived_features.len()
            + self
                .other_features
                .values()
                .map(Vec::len)
                .sum::<usize>()
    }

    /// Nested features of the container named `container`.
    pub fn container(
        &self,
        container: &str,
    ) -> &[Feature] {
        match container {
            "child_features" => &self.child_features,
            "derived_features" => &self.derived_features,
            other => {
                self.other_features
                    .get(other)
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            },
        }
    }

    pub(crate) fn container_mut(
        &mut self,
        container: &str,
    ) -> &mut Vec<Feature> {
        match container {
            "child_features" => &mut self.child_features,
            "derived_features" => &mut self.derived_features,
            other => {
                self.other_features
                    .entry(other.to_string())
                    .or_default()
            },
        }
    }
}

impl FromStr for FeatureLine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tokenizer::parse_feature(s)
    }
}

impl fmt::Display for FeatureLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&tokenizer::format_feature(self))
    }
}

/// A logical feature: one or more lines sharing an identity, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Feature {
    lines: Vec<FeatureLine>,
}

impl Feature {
    pub fn new(lines: Vec<FeatureLine>) -> Self { Self { lines } }

    pub fn from_line(line: FeatureLine) -> Self {
        Self { lines: vec![line] }
    }

    pub fn lines(&self) -> &[FeatureLine] { &self.lines }

    pub fn into_lines(self) -> Vec<FeatureLine> { self.lines }

    pub fn len(&self) -> usize { self.lines.len() }

    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    pub fn first(&self) -> Option<&FeatureLine> { self.lines.first() }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureLine> {
        self.lines.iter()
    }

    pub fn feature_type(&self) -> Option<&str> {
        self.first()
            .and_then(|l| l.feature_type.as_deref())
    }

    /// Children attached under the first line.
    pub fn children(&self) -> &[Feature] {
        self.first()
            .map(|l| l.child_features.as_slice())
            .unwrap_or(&[])
    }

    /// Minimum start and maximum end over all lines of the feature.
    pub fn span(&self) -> (Option<PosType>, Option<PosType>) {
        self.lines
            .iter()
            .fold((None, None), |(start, end), line| {
                (min_pos(start, line.start), max_pos(end, line.end))
            })
    }

    /// Total number of features in this subtree, including itself.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .lines
            .iter()
            .flat_map(|l| {
                l.child_features
                    .iter()
                    .chain(l.derived_features.iter())
                    .chain(l.other_features.values().flatten())
            })
            .map(Feature::subtree_size)
            .sum::<usize>()
    }
}

impl IntoIterator for Feature {
    type IntoIter = std::vec::IntoIter<FeatureLine>;
    type Item = FeatureLine;

    fn into_iter(self) -> Self::IntoIter { self.lines.into_iter() }
}

impl<'a> IntoIterator for &'a Feature {
    type IntoIter = std::slice::Iter<'a, FeatureLine>;
    type Item = &'a FeatureLine;

    fn into_iter(self) -> Self::IntoIter { self.lines.iter() }
}

pub(crate) fn min_pos(
    a: Option<PosType>,
    b: Option<PosType>,
) -> Option<PosType> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

pub(crate) fn max_pos(
    a: Option<PosType>,
    b: Option<PosType>,
) -> Option<PosType> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}
