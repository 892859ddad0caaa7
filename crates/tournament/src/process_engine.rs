//! Simulation engine backed by an external program

use arena_core::{EngineError, SimulationEngine, TrialRequest};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::artifacts::SEEDS_FILE;

/// Runs each seating as a child process:
///
/// ```text
/// <program> [args..] --output <dir> --seeds <dir>/seeds.json <handle0> <handle1> <handle2> <handle3>
/// ```
///
/// The child is killed if the seating is cancelled.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Full argument list for one seating
    pub fn command_args(&self, request: &TrialRequest, seeds_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("--output".into());
        args.push(request.output_dir.clone().into_os_string());
        args.push("--seeds".into());
        args.push(seeds_path.as_os_str().to_os_string());
        args.extend(request.handles.iter().map(|h| OsString::from(h.as_str())));
        args
    }
}

#[async_trait]
impl SimulationEngine for CommandEngine {
    async fn run_trials(&self, request: TrialRequest) -> Result<(), EngineError> {
        tokio::fs::create_dir_all(&request.output_dir).await?;

        let seeds_path = request.output_dir.join(SEEDS_FILE);
        let seeds = serde_json::to_vec(&request.seeds)
            .map_err(|e| EngineError::other(format!("failed to encode seeds: {}", e)))?;
        tokio::fs::write(&seeds_path, seeds).await?;

        let args = self.command_args(&request, &seeds_path);
        debug!(program = %self.program.display(), ?args, "spawning engine");

        let status = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(EngineError::Spawn)?;

        if !status.success() {
            return Err(EngineError::Exit(status.to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("command")
    }
}

#[cfg(test)]
#[path = "process_engine_tests.rs"]
mod tests;
