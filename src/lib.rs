pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod drafter;
pub mod error;
pub mod logging;
pub mod platform;
pub mod responder;
pub mod ui;

pub use error::{DrafterError, Result};
