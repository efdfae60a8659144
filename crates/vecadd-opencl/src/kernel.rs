//! Kernel source loading and program compilation.
//!
//! The kernel ships as a plain `.cl` file loaded from a path relative to
//! the working directory, so the demo can be edited and rerun without
//! rebuilding the host binary.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{OpenClError, Result};

/// Name of the single entry point the program must define.
pub const KERNEL_ENTRY: &str = "vecadd";

/// Default kernel location, relative to the repository root.
pub const DEFAULT_KERNEL_PATH: &str = "kernels/vecadd.cl";

/// Read the kernel source text. An empty file is a configuration error:
/// it usually means the process was started from the wrong directory.
pub fn load_source(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path).map_err(|e| OpenClError::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if source.is_empty() {
        return Err(OpenClError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), bytes = source.len(), "loaded kernel source");
    Ok(source)
}

#[cfg(feature = "opencl")]
pub use build::VecAddKernel;

#[cfg(feature = "opencl")]
mod build {
    use opencl3::kernel::Kernel;
    use opencl3::program::Program;
    use tracing::info;

    use super::KERNEL_ENTRY;
    use crate::context::OpenClContext;
    use crate::error::{api, OpenClError, Result};

    /// A compiled program together with its single entry point.
    pub struct VecAddKernel {
        // The program must stay alive as long as the kernel does.
        _program: Program,
        pub(crate) kernel: Kernel,
    }

    impl VecAddKernel {
        /// Compile `source` for the session's device with empty build
        /// options and extract the `vecadd` entry point.
        ///
        /// On build failure the full build log is printed to stdout
        /// before the error propagates, matching the console contract.
        pub fn build(ctx: &OpenClContext, source: &str) -> Result<Self> {
            let mut program = Program::create_from_source(&ctx.context, source)
                .map_err(|e| api("clCreateProgramWithSource", e))?;

            if let Err(build_status) = program.build(&[ctx.device.id], "") {
                let log = program
                    .get_build_log(ctx.device.id)
                    .map_err(|e| api("clGetProgramBuildInfo", e))?;
                if log.trim().is_empty() {
                    println!("Program build failed with no logs");
                } else {
                    println!("Program build log:");
                    println!("{log}");
                }
                return Err(OpenClError::Build {
                    device: ctx.device.name.clone(),
                    code: build_status.0,
                });
            }

            let kernel = Kernel::create(&program, KERNEL_ENTRY)
                .map_err(|e| api("clCreateKernel", e))?;
            info!(entry = KERNEL_ENTRY, "compiled kernel program");
            Ok(Self {
                _program: program,
                kernel,
            })
        }
    }
}
