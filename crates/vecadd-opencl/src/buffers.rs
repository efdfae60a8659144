//! Device buffer staging.

use std::ffi::c_void;
use std::ptr;

use opencl3::memory::{Buffer, CL_MEM_COPY_HOST_PTR, CL_MEM_READ_ONLY, CL_MEM_WRITE_ONLY};
use tracing::debug;

use crate::context::OpenClContext;
use crate::error::{api, OpenClError, Result};

/// The three device buffers of the pipeline: two read-only inputs filled
/// from host memory at creation, one write-only output read back at the
/// end. All are `len * 4` bytes.
pub struct StagedBuffers {
    pub(crate) a: Buffer<f32>,
    pub(crate) b: Buffer<f32>,
    pub(crate) c: Buffer<f32>,
    len: usize,
}

impl StagedBuffers {
    /// Allocate the device buffers. The inputs use copy-on-create
    /// semantics (`CL_MEM_COPY_HOST_PTR`), so no separate upload step is
    /// needed and the host vectors are free to drop afterwards.
    pub fn create(ctx: &OpenClContext, host_a: &[f32], host_b: &[f32]) -> Result<Self> {
        if host_a.len() != host_b.len() {
            return Err(OpenClError::Config {
                reason: format!(
                    "input lengths differ: {} vs {}",
                    host_a.len(),
                    host_b.len()
                ),
            });
        }
        let len = host_a.len();

        let a = unsafe {
            Buffer::<f32>::create(
                &ctx.context,
                CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
                len,
                host_a.as_ptr() as *mut c_void,
            )
            .map_err(|e| api("clCreateBuffer", e))?
        };
        let b = unsafe {
            Buffer::<f32>::create(
                &ctx.context,
                CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
                len,
                host_b.as_ptr() as *mut c_void,
            )
            .map_err(|e| api("clCreateBuffer", e))?
        };
        let c = unsafe {
            Buffer::<f32>::create(
                &ctx.context,
                CL_MEM_WRITE_ONLY,
                len,
                ptr::null_mut(),
            )
            .map_err(|e| api("clCreateBuffer", e))?
        };

        debug!(
            elements = len,
            bytes_per_buffer = len * std::mem::size_of::<f32>(),
            "staged device buffers"
        );
        Ok(Self { a, b, c, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
