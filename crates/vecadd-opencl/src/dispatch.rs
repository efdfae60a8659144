//! Kernel dispatch and timed readback loops.
//!
//! Each repetition is a one-shot cycle: enqueue, then block until the
//! device signals completion. Nothing overlaps, so every lap isolates one
//! launch (or one transfer) and the trimmed statistics stay meaningful.

use std::time::Duration;

use opencl3::kernel::ExecuteKernel;
use opencl3::memory::ClMem;
use opencl3::types::{cl_uint, CL_BLOCKING};
use tracing::{debug, trace};

use crate::buffers::StagedBuffers;
use crate::context::OpenClContext;
use crate::error::{api, Result};
use crate::kernel::VecAddKernel;
use crate::stats::LapTimer;
use crate::work_size::LaunchGrid;

/// Run `iterations` launch/wait cycles and return the per-launch laps.
///
/// Arguments are bound in the kernel's fixed order: A, B, C, then the
/// element count as `cl_uint`, whose width must match the kernel-side
/// `unsigned int` declaration exactly.
pub fn timed_launches(
    ctx: &OpenClContext,
    kernel: &VecAddKernel,
    buffers: &StagedBuffers,
    grid: LaunchGrid,
    iterations: usize,
) -> Result<Vec<Duration>> {
    if grid.global == 0 {
        debug!("zero work-items, skipping kernel launches");
        return Ok(Vec::new());
    }
    let n = buffers.len() as cl_uint;

    let mut timer = LapTimer::start();
    for iteration in 0..iterations {
        let event = unsafe {
            ExecuteKernel::new(&kernel.kernel)
                .set_arg(&buffers.a.get())
                .set_arg(&buffers.b.get())
                .set_arg(&buffers.c.get())
                .set_arg(&n)
                .set_global_work_sizes(&[grid.global])
                .set_local_work_sizes(&[grid.local])
                .enqueue_nd_range(&ctx.queue)
                .map_err(|e| api("clEnqueueNDRangeKernel", e))?
        };
        event.wait().map_err(|e| api("clWaitForEvents", e))?;

        let lap = timer.next_lap();
        trace!(iteration, lap_s = lap.as_secs_f64(), "kernel launch complete");
    }
    Ok(timer.into_laps())
}

/// Run `iterations` blocking device-to-host copies of the output buffer
/// into `out`, returning the per-copy laps. The final copy's contents are
/// what `out` holds afterwards.
pub fn timed_readbacks(
    ctx: &OpenClContext,
    buffers: &StagedBuffers,
    out: &mut [f32],
    iterations: usize,
) -> Result<Vec<Duration>> {
    if out.is_empty() {
        debug!("empty output buffer, skipping readbacks");
        return Ok(Vec::new());
    }

    let mut timer = LapTimer::start();
    for iteration in 0..iterations {
        unsafe {
            ctx.queue
                .enqueue_read_buffer(&buffers.c, CL_BLOCKING, 0, out, &[])
                .map_err(|e| api("clEnqueueReadBuffer", e))?;
        }
        let lap = timer.next_lap();
        trace!(iteration, lap_s = lap.as_secs_f64(), "readback complete");
    }
    Ok(timer.into_laps())
}
