//! OpenCL platform/device discovery and selection.
//!
//! Selection policy: platforms are scanned in enumeration order and the
//! first GPU-type device wins immediately; if no GPU exists anywhere, the
//! last CPU-type device seen is used instead; if neither exists the run
//! fails. The policy itself is a pure function over the ordered device
//! listing so it can be tested without a driver.

use std::fmt;

/// Coarse device classification used by the selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Gpu,
    Cpu,
    /// Accelerators, custom devices, anything else the driver reports.
    Other,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Gpu => write!(f, "GPU"),
            DeviceKind::Cpu => write!(f, "CPU"),
            DeviceKind::Other => write!(f, "other"),
        }
    }
}

/// Which device kinds the selector may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    /// Prefer a GPU, fall back to a CPU.
    #[default]
    Auto,
    /// Require a GPU device.
    Gpu,
    /// Require a CPU device.
    Cpu,
}

/// Pick a device index from an ordered kind listing.
///
/// `Auto` returns the first GPU if any, otherwise the last CPU. The strict
/// preferences keep the same scan direction as `Auto` for their kind.
pub fn pick_device(kinds: &[DeviceKind], preference: DevicePreference) -> Option<usize> {
    match preference {
        DevicePreference::Auto => kinds
            .iter()
            .position(|k| *k == DeviceKind::Gpu)
            .or_else(|| kinds.iter().rposition(|k| *k == DeviceKind::Cpu)),
        DevicePreference::Gpu => kinds.iter().position(|k| *k == DeviceKind::Gpu),
        DevicePreference::Cpu => kinds.iter().rposition(|k| *k == DeviceKind::Cpu),
    }
}

#[cfg(feature = "opencl")]
pub use enumeration::{inventory, select_device, DeviceSummary, SelectedDevice};

#[cfg(feature = "opencl")]
mod enumeration {
    use opencl3::device::{Device, CL_DEVICE_TYPE_ALL, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU};
    use opencl3::platform::get_platforms;
    use opencl3::types::{cl_device_id, cl_device_type};
    use tracing::{debug, info};

    use super::{pick_device, DeviceKind, DevicePreference};
    use crate::error::{api, OpenClError, Result};

    /// The device chosen for the run, with the metadata the reports need.
    #[derive(Debug, Clone)]
    pub struct SelectedDevice {
        pub name: String,
        pub vendor: String,
        pub platform: String,
        pub kind: DeviceKind,
        pub(crate) id: cl_device_id,
    }

    /// One row of the `devices` inventory listing.
    #[derive(Debug, Clone)]
    pub struct DeviceSummary {
        pub platform: String,
        pub name: String,
        pub vendor: String,
        pub kind: DeviceKind,
        pub compute_units: u32,
        pub global_mem_bytes: u64,
        pub max_work_group_size: usize,
    }

    fn classify(device_type: cl_device_type) -> DeviceKind {
        if device_type & CL_DEVICE_TYPE_GPU != 0 {
            DeviceKind::Gpu
        } else if device_type & CL_DEVICE_TYPE_CPU != 0 {
            DeviceKind::Cpu
        } else {
            DeviceKind::Other
        }
    }

    /// Enumerate every device on every platform, in driver order.
    fn discover() -> Result<Vec<SelectedDevice>> {
        let platforms = get_platforms().map_err(|e| api("clGetPlatformIDs", e))?;
        let mut devices = Vec::new();

        for platform in &platforms {
            let platform_name = platform.name().unwrap_or_default();

            // A platform with no devices reports CL_DEVICE_NOT_FOUND;
            // treat it as empty rather than failing the whole scan.
            let ids = platform.get_devices(CL_DEVICE_TYPE_ALL).unwrap_or_default();

            for id in ids {
                let device = Device::new(id);
                let kind = device.dev_type().map(classify).unwrap_or(DeviceKind::Other);
                let name = device.name().unwrap_or_default();
                let vendor = device.vendor().unwrap_or_default();

                debug!(
                    platform = %platform_name,
                    name = %name,
                    vendor = %vendor,
                    kind = %kind,
                    "discovered device"
                );

                devices.push(SelectedDevice {
                    name,
                    vendor,
                    platform: platform_name.clone(),
                    kind,
                    id,
                });
            }
        }

        Ok(devices)
    }

    /// Apply the selection policy over the live enumeration.
    pub fn select_device(preference: DevicePreference) -> Result<SelectedDevice> {
        let mut devices = discover()?;
        let kinds: Vec<DeviceKind> = devices.iter().map(|d| d.kind).collect();

        let index = pick_device(&kinds, preference).ok_or(match preference {
            DevicePreference::Auto => OpenClError::NoDevice,
            DevicePreference::Gpu => OpenClError::NoDeviceOfKind {
                wanted: DeviceKind::Gpu,
            },
            DevicePreference::Cpu => OpenClError::NoDeviceOfKind {
                wanted: DeviceKind::Cpu,
            },
        })?;

        let chosen = devices.swap_remove(index);
        info!(
            name = %chosen.name,
            vendor = %chosen.vendor,
            platform = %chosen.platform,
            kind = %chosen.kind,
            "selected device"
        );
        Ok(chosen)
    }

    /// Full platform/device inventory for the `devices` listing.
    pub fn inventory() -> Result<Vec<DeviceSummary>> {
        let summaries = discover()?
            .into_iter()
            .map(|d| {
                let device = Device::new(d.id);
                DeviceSummary {
                    platform: d.platform,
                    name: d.name,
                    vendor: d.vendor,
                    kind: d.kind,
                    compute_units: device.max_compute_units().unwrap_or_default(),
                    global_mem_bytes: device.global_mem_size().unwrap_or_default(),
                    max_work_group_size: device.max_work_group_size().unwrap_or_default(),
                }
            })
            .collect();
        Ok(summaries)
    }
}

// ── tests ────────────────────────────────────────────────────────────
