//! `vecadd run` subcommand: the end-to-end offload pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use vecadd_opencl::kernel::DEFAULT_KERNEL_PATH;
use vecadd_opencl::pipeline::{DEFAULT_ELEMENTS, DEFAULT_ITERATIONS, DEFAULT_LOCAL_SIZE};
use vecadd_opencl::{DevicePreference, RunConfig};

/// Which device class to run on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DeviceArg {
    /// First GPU if any platform exposes one, otherwise the last CPU seen.
    #[default]
    Auto,
    /// Require a GPU; fail if none is available.
    Gpu,
    /// Require a CPU; fail if none is available.
    Cpu,
}

impl From<DeviceArg> for DevicePreference {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Auto => DevicePreference::Auto,
            DeviceArg::Gpu => DevicePreference::Gpu,
            DeviceArg::Cpu => DevicePreference::Cpu,
        }
    }
}

/// Run the vector-add pipeline and report timing statistics.
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Number of f32 elements per input vector.
    #[arg(long, default_value_t = DEFAULT_ELEMENTS)]
    n: usize,

    /// Timed kernel launches (and timed readbacks) to perform.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Work-group size for the 1-D launch grid.
    #[arg(long, default_value_t = DEFAULT_LOCAL_SIZE)]
    local_size: usize,

    /// Path to the OpenCL kernel source, resolved against the working directory.
    #[arg(long, default_value = DEFAULT_KERNEL_PATH)]
    kernel: PathBuf,

    /// RNG seed for input generation. Defaults to the element count.
    #[arg(long)]
    seed: Option<u64>,

    /// Device class to select.
    #[arg(long, value_enum, default_value_t = DeviceArg::Auto)]
    device: DeviceArg,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

impl RunCommand {
    pub(crate) fn config(&self) -> RunConfig {
        RunConfig {
            n: self.n,
            iterations: self.iterations,
            local_size: self.local_size,
            kernel_path: self.kernel.clone(),
            seed: self.seed,
            preference: self.device.into(),
        }
    }

    #[cfg(feature = "opencl")]
    pub fn execute(self) -> Result<()> {
        use anyhow::Context;

        let config = self.config();
        let report = vecadd_opencl::execute(&config).context("offload pipeline failed")?;

        if let Some(path) = &self.json {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create report file {}", path.display()))?;
            serde_json::to_writer_pretty(file, &report).context("failed to serialize report")?;
            tracing::info!(path = %path.display(), "wrote run report");
        }

        Ok(())
    }

    #[cfg(not(feature = "opencl"))]
    pub fn execute(self) -> Result<()> {
        self.config().validate()?;
        anyhow::bail!(
            "vecadd was built without OpenCL support; rebuild with the `opencl` feature"
        )
    }
}
