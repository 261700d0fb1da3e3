pub mod analysis;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod fields;
pub mod matching;
pub mod output;
pub mod profit;
pub mod records;
pub mod variants;
