//! Shared value types: engine configuration and item representations.

pub mod config;
pub mod item;
