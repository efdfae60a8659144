//! Execution context and command queue setup.

use opencl3::command_queue::CommandQueue;
use opencl3::context::Context;
use opencl3::device::Device;
use tracing::info;

use crate::device::SelectedDevice;
use crate::error::{api, Result};

/// Context plus in-order command queue for the selected device.
///
/// Owns every long-lived driver handle of the run. Struct fields drop in
/// declaration order, so the queue is released before the context it was
/// created on; neither release can raise, so teardown during an error
/// unwind cannot mask the original failure.
pub struct OpenClContext {
    pub(crate) queue: CommandQueue,
    pub(crate) context: Context,
    pub device: SelectedDevice,
}

impl OpenClContext {
    /// Create the context and its queue. Queue properties are left at
    /// zero: no out-of-order flag means strictly in-order execution, so
    /// operations on this queue complete in submission order.
    pub fn create(device: SelectedDevice) -> Result<Self> {
        let cl_device = Device::new(device.id);
        let context =
            Context::from_device(&cl_device).map_err(|e| api("clCreateContext", e))?;
        let queue = CommandQueue::create_default_with_properties(&context, 0, 0)
            .map_err(|e| api("clCreateCommandQueueWithProperties", e))?;

        info!(device = %device.name, "created context and in-order command queue");
        Ok(Self {
            device,
            context,
            queue,
        })
    }
}

impl std::fmt::Debug for OpenClContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenClContext")
            .field("device", &self.device.name)
            .field("platform", &self.device.platform)
            .field("kind", &self.device.kind)
            .finish()
    }
}
