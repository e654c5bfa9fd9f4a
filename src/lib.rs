//! Hi-fi room playlist builder - shared modules for all binaries.

pub mod assembler;
pub mod audit;
pub mod catalog;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod safety;
pub mod schedule;
pub mod spotify;

#[cfg(test)]
pub mod test_utils;
