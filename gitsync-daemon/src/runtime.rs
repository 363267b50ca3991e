use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use gitsync_core::{LogLevel, RepositoryDescriptor, SyncConfig};
use gitsync_engine::{CommandExecutor, CycleOutcome, EngineSettings, ProcessExecutor, SyncEngine};

use crate::error::{io_err, DaemonError};
use crate::workdir::WorkdirGuard;

/// How long a failed cycle waits for a stop request still in flight before
/// the failure is treated as fatal.
const STOP_GRACE: Duration = Duration::from_millis(500);

/// Rolling counter kept per repository for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCycleState {
    pub consecutive_cycles: u32,
}

/// Per-repository state keyed by `local_path`.
pub type CycleStates = HashMap<PathBuf, RepositoryCycleState>;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A non-looping run finished its single pass.
    Completed,
    /// A stop was requested (signal) and the run ended early.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassOutcome {
    Finished,
    Interrupted,
}

/// Drives [`SyncEngine`] over every configured repository, once or forever.
pub struct Scheduler<E = ProcessExecutor> {
    config: SyncConfig,
    engine: Arc<SyncEngine<E>>,
    states: CycleStates,
}

impl<E: CommandExecutor + 'static> Scheduler<E> {
    pub fn new(config: SyncConfig, engine: SyncEngine<E>) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
            states: CycleStates::new(),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn states(&self) -> &CycleStates {
        &self.states
    }

    /// Run passes until done, stopped, or a cycle fails.
    ///
    /// `stop` is checked before every repository and raced against the sleep
    /// between passes. An error that surfaces after a stop was requested is
    /// treated as part of the interruption.
    pub async fn run(
        &mut self,
        mut stop: watch::Receiver<bool>,
    ) -> Result<RunOutcome, DaemonError> {
        tracing::info!(
            repositories = self.config.repositories.len(),
            loop_enabled = self.config.loop_enabled,
            gc_enabled = self.config.gc_enabled,
            sleep_secs = self.config.sleep_interval.as_secs(),
            "starting synchronization",
        );
        if self.config.repositories.is_empty() {
            tracing::warn!("no repositories configured");
        }

        loop {
            if self.run_pass(&stop).await? == PassOutcome::Interrupted {
                return Ok(RunOutcome::Interrupted);
            }
            if !self.config.loop_enabled {
                return Ok(RunOutcome::Completed);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.sleep_interval) => {}
                _ = wait_for_stop(&mut stop) => {
                    tracing::info!("interrupted while sleeping, stopping");
                    return Ok(RunOutcome::Interrupted);
                }
            }
        }
    }

    async fn run_pass(&mut self, stop: &watch::Receiver<bool>) -> Result<PassOutcome, DaemonError> {
        let repositories = self.config.repositories.clone();
        for repo in repositories {
            if stop_requested(stop) {
                tracing::info!("interrupted, stopping before {}", repo);
                return Ok(PassOutcome::Interrupted);
            }

            let prior = self
                .states
                .get(&repo.local_path)
                .copied()
                .unwrap_or_default();

            match self.run_repository(repo.clone(), prior.consecutive_cycles).await {
                Ok(outcome) => {
                    tracing::debug!(
                        repository = %repo,
                        pulled = outcome.result.pulled,
                        committed = outcome.result.committed,
                        count = outcome.count,
                        forced_gc = outcome.forced_gc,
                        "cycle finished",
                    );
                    self.states.insert(
                        repo.local_path.clone(),
                        RepositoryCycleState {
                            consecutive_cycles: outcome.count,
                        },
                    );
                }
                Err(err) => {
                    // A signal that killed the git child may not have reached the listener yet.
                    if stop_arrives_within(stop, STOP_GRACE).await {
                        tracing::info!(repository = %repo, error = %err, "interrupted during cycle, stopping");
                        return Ok(PassOutcome::Interrupted);
                    }
                    tracing::error!(repository = %repo, error = %err, "synchronization failed");
                    return Err(err);
                }
            }
        }
        Ok(PassOutcome::Finished)
    }

    /// Run one cycle on a blocking thread with the working directory set to
    /// the repository for exactly the duration of the cycle.
    async fn run_repository(
        &self,
        repo: RepositoryDescriptor,
        prior_count: u32,
    ) -> Result<CycleOutcome, DaemonError> {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || -> Result<CycleOutcome, DaemonError> {
            let _workdir = WorkdirGuard::enter(&repo.local_path)?;
            tracing::info!(">> {}", repo);
            let outcome = engine.run_cycle(&repo, prior_count)?;
            tracing::info!("<< {}", repo);
            Ok(outcome)
        })
        .await
        .map_err(|err| DaemonError::Join {
            task: "cycle",
            message: err.to_string(),
        })?
    }
}

/// Start the scheduler and block the current thread until it exits.
pub fn start_blocking(config: SyncConfig) -> Result<RunOutcome, DaemonError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config))
}

/// Run the scheduler against the real git binary, stopping on SIGINT/SIGTERM.
pub async fn run(config: SyncConfig) -> Result<RunOutcome, DaemonError> {
    let (stop_tx, stop_rx) = watch::channel(false);
    let signal_handle = tokio::spawn(listen_for_shutdown(stop_tx));

    let engine = SyncEngine::new(EngineSettings::from_config(&config));
    let mut scheduler = Scheduler::new(config, engine);
    let result = scheduler.run(stop_rx).await;

    signal_handle.abort();
    result
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

async fn listen_for_shutdown(stop_tx: watch::Sender<bool>) {
    match shutdown_signal().await {
        Ok(name) => {
            tracing::info!("received {name}, stopping");
            let _ = stop_tx.send(true);
        }
        Err(err) => tracing::warn!(error = %err, "signal handler failed"),
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "interrupt"),
        _ = terminate.recv() => Ok("terminate"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "interrupt")
}

fn stop_requested(stop: &watch::Receiver<bool>) -> bool {
    *stop.borrow()
}

async fn stop_arrives_within(stop: &watch::Receiver<bool>, grace: Duration) -> bool {
    let mut stop = stop.clone();
    tokio::time::timeout(grace, wait_for_stop(&mut stop))
        .await
        .is_ok()
}

/// Resolves once `stop` holds `true`. Never resolves if the sender is gone.
async fn wait_for_stop(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
