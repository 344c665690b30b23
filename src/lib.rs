//! Host launchers for the element-wise adder kernel
//!
//! A run generates seeded inputs, pushes them through a [`Backend`] (an
//! OpenCL accelerator or the in-process simulator) and verifies the result
//! against a host reference.

#[macro_use]
extern crate log;

pub mod backend;
pub mod config;
pub mod error;
pub mod image;
pub mod launcher;
pub mod verify;
pub mod workload;

pub use crate::backend::*;
pub use crate::config::LaunchConfig;
pub use crate::image::KernelImage;
pub use crate::launcher::{run, status, Report};
pub use crate::verify::{verify, Mismatch, Verification};
pub use crate::workload::{parse_size, Workload};
