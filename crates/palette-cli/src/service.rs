//! Service backend process control for the provider actions.
//!
//! The backend outlives the `palette` run that started it. Its pid is
//! recorded in a pid file so a later run can see and stop it.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use palette_core::{PaletteError, Result};
use palette_settings::ServiceBackendSettings;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Spawns and stops the configured service backend.
pub struct ServiceController {
    backend: Option<ServiceBackendSettings>,
    pid_file: PathBuf,
    child: Mutex<Option<Child>>,
}

impl ServiceController {
    /// Controller for `backend`, recording its pid in `pid_file`.
    /// `None` makes `start` fail.
    pub fn new(backend: Option<ServiceBackendSettings>, pid_file: PathBuf) -> Self {
        Self {
            backend,
            pid_file,
            child: Mutex::new(None),
        }
    }

    /// Whether the backend is alive, whichever run started it.
    pub async fn is_running(&self) -> bool {
        let mut child = self.child.lock().await;
        self.running(&mut child).await
    }

    /// Spawn the backend and record its pid. Fails if it is already running.
    pub async fn start(&self) -> Result<()> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| PaletteError::Action("no service backend configured".into()))?;

        let mut child = self.child.lock().await;
        if self.running(&mut child).await {
            return Err(PaletteError::Action("service is already running".into()));
        }

        let mut cmd = Command::new(&backend.command);
        let _ = cmd.args(&backend.args).stdin(Stdio::null());
        debug!(command = %backend.command, args = ?backend.args, "spawning service");

        let mut spawned = cmd
            .spawn()
            .map_err(|e| PaletteError::Action(format!("failed to start {}: {e}", backend.command)))?;
        let pid = spawned.id().unwrap_or_default();
        if let Err(e) = self.record(pid) {
            let _ = spawned.start_kill();
            return Err(PaletteError::Action(format!(
                "failed to write {}: {e}",
                self.pid_file.display()
            )));
        }
        info!(pid, "service started");
        *child = Some(spawned);
        Ok(())
    }

    /// Stop the backend. Fails if it is not running.
    pub async fn stop(&self) -> Result<()> {
        let mut child = self.child.lock().await;
        if Self::reap(&mut child)
            && let Some(mut running) = child.take()
        {
            running
                .kill()
                .await
                .map_err(|e| PaletteError::Action(format!("failed to stop service: {e}")))?;
        } else {
            let pid = match self.recorded_pid() {
                Some(pid) if signal(pid, "-0").await => pid,
                _ => {
                    self.forget();
                    return Err(PaletteError::Action("service is not running".into()));
                }
            };
            if !signal(pid, "-TERM").await {
                return Err(PaletteError::Action(format!("failed to stop service (pid {pid})")));
            }
        }
        self.forget();
        info!("service stopped");
        Ok(())
    }

    /// Stop the backend if running, start it otherwise.
    pub async fn toggle(&self) -> Result<()> {
        if self.is_running().await {
            self.stop().await
        } else {
            self.start().await
        }
    }

    async fn running(&self, child: &mut Option<Child>) -> bool {
        if Self::reap(child) {
            return true;
        }
        match self.recorded_pid() {
            Some(pid) if signal(pid, "-0").await => true,
            Some(pid) => {
                debug!(pid, "service exited, removing pid file");
                self.forget();
                false
            }
            None => false,
        }
    }

    // Drops a child that has already exited; true if one is still running.
    fn reap(child: &mut Option<Child>) -> bool {
        let exited = match child.as_mut() {
            None => return false,
            Some(running) => !matches!(running.try_wait(), Ok(None)),
        };
        if exited {
            *child = None;
        }
        !exited
    }

    fn recorded_pid(&self) -> Option<u32> {
        let raw = std::fs::read_to_string(&self.pid_file).ok()?;
        // 0 and 1 would signal the process group or init.
        raw.trim().parse().ok().filter(|&pid: &u32| pid > 1)
    }

    fn record(&self, pid: u32) -> std::io::Result<()> {
        if let Some(dir) = self.pid_file.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.pid_file, pid.to_string())
    }

    fn forget(&self) {
        if let Err(e) = std::fs::remove_file(&self.pid_file)
            && e.kind() != ErrorKind::NotFound
        {
            warn!(path = %self.pid_file.display(), error = %e, "failed to remove pid file");
        }
    }
}

/// Send `sig` to `pid` with `kill(1)`; true on success.
async fn signal(pid: u32, sig: &str) -> bool {
    Command::new("kill")
        .arg(sig)
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok_and(|status| status.success())
}
