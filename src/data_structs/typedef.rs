use indexmap::IndexMap;
use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 20;
/// Inline string used for feature identifiers. Most GTF transcript ids fit
/// without a heap allocation.
pub type GtfSmallStr = SmallString<[u8; SMALLSTR_SIZE]>;
/// 1-based, fully closed coordinate as written in the GTF columns.
pub type PosType = u64;
/// Attribute name to its values, in the order they appear on the line.
pub type Attributes = IndexMap<String, Vec<String>>;
