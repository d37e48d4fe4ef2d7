pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod indexer;
pub mod model;
pub mod output;
pub mod search;
pub mod source;
pub mod storage;
pub mod test_utils;

pub use error::{ErrorCode, LogseqError, Result};
