pub use crate::data_structs::typedef::{
    Attributes,
    GtfSmallStr,
    PosType,
};
pub use crate::data_structs::{
    Comment,
    Directive,
    DirectiveDetails,
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
    ParserStatus,
};
