pub mod config;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod predict;
pub mod render;
mod runner;
pub mod seq;
pub mod session;

use crate::errors::ProteinScapeError;

pub use crate::runner::DEFAULT_SEQUENCE;

pub fn run() -> Result<(), ProteinScapeError> {
    runner::run()
}
