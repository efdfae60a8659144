//! `vecadd devices` subcommand: enumerate OpenCL platforms and devices.

use anyhow::Result;

#[cfg(feature = "opencl")]
pub fn execute() -> Result<()> {
    use anyhow::Context;
    use console::style;
    use vecadd_opencl::stats::GIB;

    let devices = vecadd_opencl::inventory().context("failed to enumerate OpenCL devices")?;
    if devices.is_empty() {
        println!("No OpenCL devices found.");
        return Ok(());
    }

    let mut current_platform: Option<&str> = None;
    for device in &devices {
        if current_platform != Some(device.platform.as_str()) {
            println!("{} {}", style("Platform:").bold(), device.platform);
            current_platform = Some(device.platform.as_str());
        }
        println!(
            "  {} [{}] {}",
            style(&device.name).cyan(),
            device.kind,
            device.vendor
        );
        println!(
            "    compute units: {}, global memory: {:.1} GiB, max work-group: {}",
            device.compute_units,
            device.global_mem_bytes as f64 / GIB,
            device.max_work_group_size
        );
    }

    Ok(())
}

#[cfg(not(feature = "opencl"))]
pub fn execute() -> Result<()> {
    anyhow::bail!("vecadd was built without OpenCL support; rebuild with the `opencl` feature")
}
