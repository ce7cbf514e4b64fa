// LeadRank - platform/mod.rs
//
// Platform layer: config file loading and platform directory resolution.

pub mod config;
