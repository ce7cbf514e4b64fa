// LeadRank - app/mod.rs
//
// Application layer: orchestration, file ingestion, the scoring client,
// and session state. Dependencies: core layer.

pub mod ingest;
pub mod pipeline;
pub mod scoring;
pub mod session;
