pub mod aggregate;
pub mod characterize;
pub mod columns;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod plot;
pub mod stats;
pub mod timestamp;
