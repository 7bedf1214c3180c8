// Library for tests to access modules

pub mod config;
pub mod counter_source;
pub mod delta;
pub mod filter;
pub mod models;
pub mod prune;
pub mod recorder;
pub mod report;
pub mod traffic_repo;
