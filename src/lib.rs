//! regdocs-explorer: filter, summarize and chart a corpus of FDA regulatory letters
//!
//! The library turns a static JSON list of letters into filtered views, a
//! column-typed flow graph for Sankey rendering and a summary request for an
//! LLM endpoint. The `regdocs` binary is a thin command-line front end.

pub mod cli;
pub mod config;
pub mod domain;
pub mod filter;
pub mod flow;
pub mod gateway;
pub mod render;
pub mod selection;
pub mod store;
pub mod summary;
pub mod utils;
