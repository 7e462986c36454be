//! Infrastructure layer for the GraphQL gateway module.
//!
//! Contains the default stitcher and the snapshot file writer.

pub mod snapshot;
pub mod stitcher;

pub use snapshot::SnapshotWriter;
pub use stitcher::MergingStitcher;
