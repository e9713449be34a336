//! Thin wrapper over the `scanimage` command-line utility from SANE.

mod backend;
mod device;
mod result;

pub use backend::{Backend, DEFAULT_PROGRAM};
pub use device::Device;
pub use result::{Result, ScanimageError};
