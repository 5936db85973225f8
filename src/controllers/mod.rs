pub mod cli;
pub mod engine;
pub mod interactive;
pub mod ports;
pub mod registry;
