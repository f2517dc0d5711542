//! Timeline/editing engine for PixelCut: track registry, clip store,
//! collision-free placement, split, drag interaction, media bin, and the
//! serializable project snapshot.

pub mod bin;
pub mod drag;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod timeline;
pub mod types;
