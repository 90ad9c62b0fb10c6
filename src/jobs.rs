pub mod manifest;
pub mod png;
pub mod runner;
