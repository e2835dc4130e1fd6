pub mod api;
pub mod chain;
pub mod cli;
pub mod compute;
pub mod config;
pub mod error;
pub mod model;
pub mod oracle;
pub mod registry;
pub mod schema;
pub mod yield_calc;

pub use error::YieldError;
