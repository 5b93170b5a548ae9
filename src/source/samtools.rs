use crate::pileup::Region;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// `samtools mpileup` running as a child process.
///
/// Lines are read as they are produced. Dropping the source before the
/// stream ends kills the process.
pub struct SamtoolsPileup {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

/// Arguments for one region, with base and mapping quality columns.
pub fn mpileup_args(bam_file: &Path, region: &Region, min_qual: u8, max_depth: u32) -> Vec<String> {
    vec![
        "mpileup".to_string(),
        "-Q".to_string(),
        min_qual.to_string(),
        "-d".to_string(),
        max_depth.to_string(),
        "-s".to_string(),
        "-r".to_string(),
        region.to_string(),
        bam_file.display().to_string(),
    ]
}

impl SamtoolsPileup {
    pub fn spawn(
        samtools: &str,
        bam_file: &Path,
        region: &Region,
        min_qual: u8,
        max_depth: u32,
    ) -> Result<Self> {
        let args = mpileup_args(bam_file, region, min_qual, max_depth);
        debug!("running {} {}", samtools, args.join(" "));

        let mut child = Command::new(samtools)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to run {} mpileup", samtools))?;
        let stdout = child
            .stdout
            .take()
            .context("samtools mpileup stdout was not captured")?;

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }
}

impl Iterator for SamtoolsPileup {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

impl Drop for SamtoolsPileup {
    fn drop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) if !status.success() => {
                warn!("samtools mpileup exited with {}", status);
            }
            Ok(Some(_)) => {}
            _ => {
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
    }
}
