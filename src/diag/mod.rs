// Debug diagnostics for --debug mode
//
// Reports system RAM and CPU count via the sysinfo crate and probes for
// CUDA hardware acceleration by asking nvidia-smi for the GPU name.

use tokio::process::Command;

/// Total system RAM in GB. Works on macOS, Linux, and Windows.
pub fn total_ram_gb() -> usize {
    use sysinfo::System;
    let mut sys = System::new();
    sys.refresh_memory();
    let gb = sys.total_memory() / (1024 * 1024 * 1024);
    if gb == 0 {
        tracing::warn!("Could not detect system RAM, assuming 8GB");
        8
    } else {
        gb as usize
    }
}

pub fn cpu_count() -> usize {
    use sysinfo::System;
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.cpus().len()
}

/// GPU name reported by nvidia-smi, or `None` when no CUDA-capable
/// device (or no nvidia-smi binary) is present.
pub async fn cuda_device_name() -> Option<String> {
    let output = Command::new("nvidia-smi")
        .args(["--query-gpu=name", "--format=csv,noheader"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let name = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Print the --debug diagnostic block.
pub async fn print_diagnostics() {
    println!("DEBUG: System RAM: {} GB", total_ram_gb());
    println!("DEBUG: CPU cores: {}", cpu_count());
    match cuda_device_name().await {
        Some(name) => println!("DEBUG: GPU available: {}", name),
        None => println!("DEBUG: No GPU detected. Running on CPU."),
    }
}
