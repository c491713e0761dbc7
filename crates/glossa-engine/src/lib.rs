pub mod backend;
pub mod cli;
pub mod config;
pub mod executor;
pub mod gateway;
pub mod history;
pub mod http;
pub mod pipeline;
pub mod route;

pub use glossa_common::formatter;
pub use glossa_common::protocol;
