pub mod cli;
pub mod config;
pub mod constants;
pub mod git;
pub mod matrix;
pub mod output;
pub mod service;
pub mod tags;

pub use anyhow::Result;
