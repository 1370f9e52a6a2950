pub use crate::errors::HarnessError;

pub mod cli;
pub mod compiler;
pub mod discovery;
pub mod errors;
pub mod reconcile;
pub mod runner;
pub mod suite;
