//! Execution capability of the launcher
//!
//! Generation and verification live in [`crate::launcher`]; a backend only
//! moves the workload through the kernel and back.

use crate::error::Result;
use crate::workload::Workload;

#[cfg(feature = "opencl")]
pub mod opencl;
pub mod select;
pub mod sim;

#[cfg(feature = "opencl")]
pub use self::opencl::OpenClBackend;
pub use self::select::{select_device, PlatformInfo};
pub use self::sim::Simulator;

pub trait Backend {
    /// Human-readable name of the target, e.g. the device name
    fn describe(&self) -> String;

    /// Run the kernel over `workload`, leaving the result in `workload.c`
    ///
    /// Returns the device execution time in milliseconds when profiling data
    /// is available.
    fn execute(&mut self, workload: &mut Workload) -> Result<Option<f64>>;
}
