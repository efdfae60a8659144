//! Host-side reference computation and exact verification.

use tracing::info;

use crate::error::{OpenClError, Result};

/// Elementwise sum computed on the host.
pub fn host_reference(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Compare the device output against a freshly computed host reference.
///
/// Both sides perform the same single-precision addition, so the results
/// are expected to be identical bit patterns; no epsilon is applied. The
/// first mismatch fails the run, and the error stays generic on purpose.
pub fn verify_exact(device_out: &[f32], a: &[f32], b: &[f32]) -> Result<()> {
    if device_out.len() != a.len() || a.len() != b.len() {
        return Err(OpenClError::Mismatch);
    }
    for i in 0..a.len() {
        if device_out[i] != a[i] + b[i] {
            return Err(OpenClError::Mismatch);
        }
    }
    info!(elements = a.len(), "device output matches host reference");
    Ok(())
}
