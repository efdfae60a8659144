//! The end-to-end offload pipeline.
//!
//! One linear pass: select a device, build the context and queue,
//! generate inputs, stage buffers, compile the kernel, run the timed
//! launches, read the result back, verify against the host. The stage
//! summary lines go to stdout (that output is the program's product);
//! diagnostics go to the tracing layer.

use std::path::PathBuf;

use serde::Serialize;

use crate::device::DevicePreference;
use crate::error::{OpenClError, Result};
use crate::kernel::DEFAULT_KERNEL_PATH;
use crate::stats::TrimmedStats;

/// Element count the demo ships with.
pub const DEFAULT_ELEMENTS: usize = 100_000_000;

/// Timed repetitions per measured stage.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Work-group size for the 1-D dispatch.
pub const DEFAULT_LOCAL_SIZE: usize = 128;

/// Everything the pipeline needs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub n: usize,
    pub iterations: usize,
    pub local_size: usize,
    pub kernel_path: PathBuf,
    /// Input generator seed; `None` seeds with `n` itself.
    pub seed: Option<u64>,
    pub preference: DevicePreference,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_ELEMENTS,
            iterations: DEFAULT_ITERATIONS,
            local_size: DEFAULT_LOCAL_SIZE,
            kernel_path: PathBuf::from(DEFAULT_KERNEL_PATH),
            seed: None,
            preference: DevicePreference::Auto,
        }
    }
}

impl RunConfig {
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(self.n as u64)
    }

    /// Reject configurations the kernel contract cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(OpenClError::Config {
                reason: "iterations must be at least 1".into(),
            });
        }
        if self.local_size == 0 {
            return Err(OpenClError::Config {
                reason: "local work-group size must be at least 1".into(),
            });
        }
        if self.n > u32::MAX as usize {
            // The kernel takes the element count as a 32-bit unsigned int.
            return Err(OpenClError::Config {
                reason: format!("n = {} does not fit the kernel's 32-bit element count", self.n),
            });
        }
        Ok(())
    }
}

/// Measurements and outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub device_name: String,
    pub device_vendor: String,
    pub platform_name: String,
    pub device_kind: String,
    pub n: usize,
    pub seed: u64,
    pub iterations: usize,
    pub local_size: usize,
    pub global_size: usize,
    pub kernel_time: TrimmedStats,
    pub gflops: f64,
    pub vram_bandwidth_gb_s: f64,
    pub transfer_time: TrimmedStats,
    pub transfer_bandwidth_gb_s: f64,
    pub verified: bool,
}

#[cfg(feature = "opencl")]
pub use run::execute;

#[cfg(feature = "opencl")]
mod run {
    use tracing::info;

    use super::{RunConfig, RunReport};
    use crate::buffers::StagedBuffers;
    use crate::context::OpenClContext;
    use crate::data::generate_inputs;
    use crate::device::select_device;
    use crate::dispatch::{timed_launches, timed_readbacks};
    use crate::error::Result;
    use crate::kernel::{load_source, VecAddKernel};
    use crate::stats::{gflops, gib_per_second, TrimmedStats};
    use crate::verify::verify_exact;
    use crate::work_size::LaunchGrid;

    /// Run the whole pipeline once and report the measurements.
    pub fn execute(config: &RunConfig) -> Result<RunReport> {
        config.validate()?;

        let device = select_device(config.preference)?;
        let ctx = OpenClContext::create(device)?;

        let seed = config.effective_seed();
        let (host_a, host_b) = generate_inputs(config.n, seed);
        println!("Data generated for n={}!", config.n);

        let buffers = StagedBuffers::create(&ctx, &host_a, &host_b)?;

        let source = load_source(&config.kernel_path)?;
        let kernel = VecAddKernel::build(&ctx, &source)?;

        let grid = LaunchGrid::for_elements(config.n, config.local_size);
        info!(
            global = grid.global,
            local = grid.local,
            work_groups = grid.work_groups(),
            "launch grid computed"
        );

        let bytes_per_buffer = config.n as f64 * std::mem::size_of::<f32>() as f64;

        let kernel_laps = timed_launches(&ctx, &kernel, &buffers, grid, config.iterations)?;
        let kernel_time = TrimmedStats::from_laps(&kernel_laps);
        println!(
            "Kernel average time: {:.6}+-{:.6} s",
            kernel_time.mean_s, kernel_time.stddev_s
        );
        let gflops_achieved = gflops(config.n, kernel_time.mean_s);
        println!("GFlops: {gflops_achieved:.3}");
        // Each element costs two reads and one write of 4 bytes.
        let vram_bandwidth = gib_per_second(3.0 * bytes_per_buffer, kernel_time.mean_s);
        println!("VRAM bandwidth: {vram_bandwidth:.3} GB/s");

        let mut host_c = vec![0.0f32; config.n];
        let transfer_laps = timed_readbacks(&ctx, &buffers, &mut host_c, config.iterations)?;
        let transfer_time = TrimmedStats::from_laps(&transfer_laps);
        println!(
            "Result data transfer time: {:.6}+-{:.6} s",
            transfer_time.mean_s, transfer_time.stddev_s
        );
        let transfer_bandwidth = gib_per_second(bytes_per_buffer, transfer_time.mean_s);
        println!("VRAM -> RAM bandwidth: {transfer_bandwidth:.3} GB/s");

        verify_exact(&host_c, &host_a, &host_b)?;

        Ok(RunReport {
            device_name: ctx.device.name.clone(),
            device_vendor: ctx.device.vendor.clone(),
            platform_name: ctx.device.platform.clone(),
            device_kind: ctx.device.kind.to_string(),
            n: config.n,
            seed,
            iterations: config.iterations,
            local_size: config.local_size,
            global_size: grid.global,
            kernel_time,
            gflops: gflops_achieved,
            vram_bandwidth_gb_s: vram_bandwidth,
            transfer_time,
            transfer_bandwidth_gb_s: transfer_bandwidth,
            verified: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_shipped_demo() {
        let config = RunConfig::default();
        assert_eq!(config.n, 100_000_000);
        assert_eq!(config.iterations, 20);
        assert_eq!(config.local_size, 128);
        assert_eq!(config.kernel_path, PathBuf::from("kernels/vecadd.cl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn seed_defaults_to_n() {
        let config = RunConfig {
            n: 12345,
            ..Default::default()
        };
        assert_eq!(config.effective_seed(), 12345);

        let seeded = RunConfig {
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(seeded.effective_seed(), 7);
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let config = RunConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OpenClError::Config { .. })
        ));
    }

    #[test]
    fn zero_local_size_is_rejected() {
        let config = RunConfig {
            local_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn n_beyond_u32_is_rejected() {
        let config = RunConfig {
            n: u32::MAX as usize + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn n_zero_is_a_valid_configuration() {
        let config = RunConfig {
            n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_seed(), 0);
    }
}
