pub mod config;
pub mod grading;
pub mod interactive;
pub mod output;
pub mod roster;
pub mod session;
