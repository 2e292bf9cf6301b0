//! CLI library components for mdlist.

pub mod config;
pub mod logging;
pub mod run;
