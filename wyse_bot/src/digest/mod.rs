pub mod dto;
pub mod runner;
pub mod scheduler;
