// LeadRank - core/mod.rs
//
// Core pipeline logic layer.
// Dependencies: std, serde, and the format serialisers (csv, xlsx).
// Must NOT depend on: app, platform, network, or the filesystem.

pub mod clean;
pub mod export;
pub mod filter;
pub mod merge;
pub mod model;
