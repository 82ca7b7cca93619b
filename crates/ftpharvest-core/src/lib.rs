pub mod config;
pub mod logging;

pub mod dirlist;
pub mod fetcher;
pub mod filename;
pub mod indexer;
pub mod selector;
pub mod transport;
