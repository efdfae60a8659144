//! End-to-end smoke test against real OpenCL hardware.

#![cfg(feature = "opencl")]

use std::path::PathBuf;

use vecadd_opencl::{execute, DevicePreference, RunConfig};

fn shipped_kernel_path() -> PathBuf {
    // Integration tests run with the crate directory as cwd, so resolve
    // the kernel relative to the manifest instead.
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../kernels/vecadd.cl")
}

#[test]
#[ignore = "requires OpenCL runtime - run with --ignored on GPU machine"]
fn smoke_full_pipeline_on_real_device() {
    let config = RunConfig {
        n: 1 << 20,
        iterations: 5,
        kernel_path: shipped_kernel_path(),
        ..Default::default()
    };

    let report = execute(&config).expect("pipeline should pass on real hardware");
    assert!(report.verified);
    assert_eq!(report.n, 1 << 20);
    assert_eq!(report.global_size, 1 << 20);
    assert!(report.kernel_time.mean_s > 0.0);
    assert!(report.transfer_time.mean_s > 0.0);
}

#[test]
#[ignore = "requires OpenCL runtime - run with --ignored on GPU machine"]
fn smoke_cpu_preference_on_real_device() {
    let config = RunConfig {
        n: 100_000,
        iterations: 3,
        kernel_path: shipped_kernel_path(),
        preference: DevicePreference::Cpu,
        ..Default::default()
    };

    match execute(&config) {
        Ok(report) => assert_eq!(report.device_kind, "CPU"),
        // A machine whose platforms expose no CPU device is fine too.
        Err(err) => eprintln!("no CPU device available: {err}"),
    }
}
