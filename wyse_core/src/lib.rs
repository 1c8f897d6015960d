pub mod batch;
pub mod config;
pub mod error;
pub mod helpers;
pub mod news;
pub mod pairs;
pub mod quotes;
pub mod report;
pub mod ta;
