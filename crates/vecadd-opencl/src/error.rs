//! Error types for the OpenCL offload pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the OpenCL backend.
///
/// Every variant is terminal for the run: there are no retries anywhere in
/// the pipeline, failures propagate to the binary boundary and end the
/// process.
#[derive(Debug, Error)]
pub enum OpenClError {
    /// A driver call returned a non-success status. Carries the failing
    /// call, the raw status code, and the host call site.
    #[error("OpenCL error code {code} encountered at {file}:{line} ({call})")]
    Api {
        call: &'static str,
        code: i32,
        file: &'static str,
        line: u32,
    },

    #[error("no GPU or CPU device found on any OpenCL platform")]
    NoDevice,

    #[error("no {wanted} device found")]
    NoDeviceOfKind { wanted: crate::device::DeviceKind },

    #[error("failed to read kernel source {}", .path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source file exists but is empty, which almost always means the
    /// process was started from the wrong working directory.
    #[error("kernel source {} is empty (is the working directory the repository root?)", .path.display())]
    EmptySource { path: PathBuf },

    /// Program build failed. The build log has already been printed by the
    /// time this is raised.
    #[error("kernel build failed with status {code} for device {device}")]
    Build { device: String, code: i32 },

    #[error("invalid run configuration: {reason}")]
    Config { reason: String },

    /// The device output does not match the host reference. Deliberately
    /// generic: the failing index is not reported.
    #[error("host and device results differ")]
    Mismatch,
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, OpenClError>;

/// Convert a driver error into [`OpenClError::Api`], capturing the caller's
/// file and line so the diagnostic names the failing call site.
#[cfg(feature = "opencl")]
#[track_caller]
pub(crate) fn api(call: &'static str, err: opencl3::error_codes::ClError) -> OpenClError {
    let location = std::panic::Location::caller();
    OpenClError::Api {
        call,
        code: err.0,
        file: location.file(),
        line: location.line(),
    }
}
