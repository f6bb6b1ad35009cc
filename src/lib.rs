pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod terminal;
pub mod types;
