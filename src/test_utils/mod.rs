//! Shared test utilities for logseq-index.

pub mod fixtures;

#[cfg(test)]
pub mod arbitrary;
