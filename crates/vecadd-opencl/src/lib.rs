//! OpenCL vector-add offload pipeline.
//!
//! Implements the classic compute-offload demo end to end: device
//! discovery (GPU preferred, CPU fallback), context and in-order queue
//! setup, buffer staging, runtime kernel compilation with build-log
//! surfacing, repeated timed dispatch, timed readback, and exact
//! host-side verification, with trimmed-mean timing statistics and
//! throughput/bandwidth reporting.
//!
//! The `opencl` feature (on by default) links the OpenCL ICD loader via
//! the `opencl3` crate. With `--no-default-features` the crate still
//! builds everywhere and exposes the driver-independent pieces: the
//! selection policy, grid sizing, statistics, input generation, source
//! loading, and verification.

pub mod data;
pub mod device;
pub mod error;
pub mod kernel;
pub mod pipeline;
pub mod stats;
pub mod verify;
pub mod work_size;

#[cfg(feature = "opencl")]
pub mod buffers;
#[cfg(feature = "opencl")]
pub mod context;
#[cfg(feature = "opencl")]
pub mod dispatch;

pub use device::{pick_device, DeviceKind, DevicePreference};
pub use error::{OpenClError, Result};
pub use pipeline::{RunConfig, RunReport};
pub use stats::TrimmedStats;
pub use work_size::LaunchGrid;

#[cfg(feature = "opencl")]
pub use context::OpenClContext;
#[cfg(feature = "opencl")]
pub use device::{inventory, select_device, DeviceSummary, SelectedDevice};
#[cfg(feature = "opencl")]
pub use pipeline::execute;
