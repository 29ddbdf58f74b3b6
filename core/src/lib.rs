//! Synthetic COVID-era interstate migration data: a seeded generator for
//! the dashboard's seven collections and the read-only query layer that
//! serves them.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod emotion_dataset;
pub mod engine;
pub mod error;
pub mod flow_dataset;
pub mod generator;
pub mod infodemic_dataset;
pub mod manifest;
pub mod network;
pub mod policy_dataset;
pub mod query;
pub mod resilience_dataset;
pub mod rng;
pub mod service;
pub mod snapshot_dataset;
pub mod store;
pub mod time_series_dataset;
pub mod types;
