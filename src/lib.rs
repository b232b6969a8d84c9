pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod file;
pub mod image_ops;
pub mod interactive;
pub mod utils;
