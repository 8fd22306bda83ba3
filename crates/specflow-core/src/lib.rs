pub mod agent;
pub mod config;
pub mod error;
pub mod feature;
pub mod git;
pub mod io;
pub mod paths;
pub mod plan;
pub mod prereq;
pub mod repo;
pub mod templates;

pub use error::{Result, SpecflowError};
