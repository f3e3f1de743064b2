//! gridcast — Daily playout schedule generator for a TV channel.
//!
//! Inventories video files by category, fills a fixed daily template
//! using least-recently-used rotation with duration fitting, and writes
//! the result as a JSON playlist document for the downstream player.
//! The CLI and HTTP surface both consume this crate.

pub mod app;
pub mod assembler;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod media;
pub mod scanner;
pub mod selection;
pub mod server;
pub mod storage;
pub mod template;
