use anyhow::{bail, Context, Result};
use std::process::Command;

/// Make sure the samtools binary can be executed before handing it a BAM.
pub fn check_samtools(samtools: &str) -> Result<String> {
    let output = Command::new(samtools)
        .arg("--version")
        .output()
        .with_context(|| format!("{} not found. Please install samtools (http://www.htslib.org/) and ensure it's in your PATH", samtools))?;
    if !output.status.success() {
        bail!("{} --version exited with {}", samtools, output.status);
    }

    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();
    Ok(version)
}
