//! Re-exported dependencies, so that downstream crates use the same versions.

pub use {
    anyhow,
    arcstr,
    indexmap,
    itertools,
    log,
    pretty_env_logger,
    serde,
    serde_json,
};
