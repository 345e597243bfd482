//! CLI command implementations.

pub(crate) mod periods;
pub(crate) mod replay;
pub(crate) mod simulate;
