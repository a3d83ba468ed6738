//! ReviewIQ - Customer Review Analysis
//!
//! Sends batches of customer reviews to a hosted generative model, validates
//! the structured analysis it returns, and keeps a local history of reports.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod render;
pub mod reviews;
pub mod storage;

pub use error::{AnalysisFailure, Result, ReviewIqError};
