//! stars-graph: heuristic topical classification of starred repositories
//!
//! The core is [`classify`], a pure rule-table scoring engine. Around it sit
//! record [`ingest`], the exported data file and graph view model in
//! [`render`], and description repair in [`clean`].

pub mod classify;
pub mod clean;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod render;
pub mod utils;
