use std::{
    process::{ExitStatus, Stdio},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use chrono::Local;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    sync::oneshot,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::response::{parse_output, ExecutionOutcome, Response, SENTINEL_MARKER};

pub const DEFAULT_SHELL: &str = "sh";

// Readers may outlive a killed process when it leaked the pipes to a child.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorSettings {
    pub shell: String,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

/// Runs generated commands through a shell, one invocation at a time.
///
/// Clones share the in-flight slot, so a clone can cancel what another
/// clone started. Separate `Executor::new` instances never interfere.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    settings: Arc<ExecutorSettings>,
    slot: Arc<Mutex<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    next_id: u64,
    inflight: Option<Inflight>,
}

#[derive(Debug)]
struct Inflight {
    id: u64,
    kill_tx: oneshot::Sender<()>,
}

impl Executor {
    pub fn new(settings: ExecutorSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            slot: Arc::default(),
        }
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// The script handed to the shell: `exec` so a kill reaches curl itself,
    /// plus the status sentinel and quiet flags.
    pub fn shell_script(command: &str) -> String {
        format!("exec {command} -w '\\n{SENTINEL_MARKER}:%{{http_code}}' -s -S")
    }

    pub fn is_running(&self) -> bool {
        self.lock().inflight.is_some()
    }

    /// Kills the in-flight invocation, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let inflight = self.lock().inflight.take();
        match inflight {
            Some(inflight) => {
                info!(id = inflight.id, "cancelling request");
                let _ = inflight.kill_tx.send(());
                true
            }
            None => false,
        }
    }

    /// Runs `command` to completion or cancellation. Never fails: spawn errors,
    /// non-zero exits and kills all come back as an unsuccessful [`Response`].
    pub async fn execute(&self, command: &str) -> Response {
        let timestamp = Local::now();
        let started = Instant::now();
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let mut guard = self.begin(kill_tx);
        let id = guard.id;

        let script = Self::shell_script(command);
        debug!(id, shell = %self.settings.shell, script = %script, "spawning request");

        let mut child = match Command::new(&self.settings.shell)
            .arg("-c")
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(error) => {
                guard.release();
                warn!(id, shell = %self.settings.shell, %error, "failed to spawn shell");
                return Response {
                    timestamp,
                    command: command.to_string(),
                    status_code: None,
                    headers: String::new(),
                    body: String::new(),
                    error_output: format!("failed to spawn {}: {error}", self.settings.shell),
                    duration: started.elapsed(),
                    success: false,
                    outcome: ExecutionOutcome::SpawnFailed,
                };
            }
        };

        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());

        let exit = tokio::select! {
            status = child.wait() => Some(status),
            _ = kill_rx => {
                let _ = child.kill().await;
                None
            }
        };

        // A cancel racing with a natural exit wins if it took the slot first.
        let owned = guard.release();
        let (outcome, status) = match exit {
            Some(status) if owned => (ExecutionOutcome::Completed, Some(status)),
            Some(_) | None => (ExecutionOutcome::Cancelled, None),
        };

        let grace = match outcome {
            ExecutionOutcome::Completed => None,
            _ => Some(DRAIN_GRACE),
        };
        let stdout = stdout.finish(grace).await;
        let mut error_output = stderr.finish(grace).await;
        let duration = started.elapsed();

        let parsed = parse_output(&stdout);
        let (status_code, success) = match &status {
            Some(Ok(exit_status)) => (parsed.status_code, exit_status.success()),
            Some(Err(error)) => {
                if !error_output.is_empty() && !error_output.ends_with('\n') {
                    error_output.push('\n');
                }
                error_output.push_str(&format!("failed to wait for process: {error}"));
                (parsed.status_code, false)
            }
            None => (None, false),
        };

        log_exit(id, outcome, status.as_ref(), duration);

        Response {
            timestamp,
            command: command.to_string(),
            status_code,
            headers: parsed.headers,
            body: parsed.body,
            error_output,
            duration,
            success,
            outcome,
        }
    }

    fn begin(&self, kill_tx: oneshot::Sender<()>) -> SlotGuard<'_> {
        let mut slot = self.lock();
        slot.next_id += 1;
        let id = slot.next_id;
        if let Some(previous) = slot.inflight.replace(Inflight { id, kill_tx }) {
            info!(id = previous.id, "superseded by a new request");
            let _ = previous.kill_tx.send(());
        }
        SlotGuard {
            executor: self,
            id,
            owned: None,
        }
    }

    /// Clears the slot when it still belongs to `id`.
    fn finish(&self, id: u64) -> bool {
        let mut slot = self.lock();
        let owned = slot.inflight.as_ref().is_some_and(|inflight| inflight.id == id);
        if owned {
            slot.inflight = None;
        }
        owned
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the slot once, whether `execute` returns or its future is dropped.
struct SlotGuard<'a> {
    executor: &'a Executor,
    id: u64,
    owned: Option<bool>,
}

impl SlotGuard<'_> {
    /// True when the slot still belonged to this invocation.
    fn release(&mut self) -> bool {
        let (executor, id) = (self.executor, self.id);
        *self.owned.get_or_insert_with(|| executor.finish(id))
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        if self.owned.is_none() {
            debug!(id = self.id, "request dropped before completion");
            self.release();
        }
    }
}

fn log_exit(
    id: u64,
    outcome: ExecutionOutcome,
    status: Option<&std::io::Result<ExitStatus>>,
    duration: Duration,
) {
    match (outcome, status) {
        (ExecutionOutcome::Completed, Some(Ok(status))) => {
            debug!(id, code = ?status.code(), elapsed_ms = duration.as_millis() as u64, "request finished")
        }
        (ExecutionOutcome::Completed, Some(Err(error))) => {
            warn!(id, %error, "request finished without an exit status")
        }
        _ => info!(id, elapsed_ms = duration.as_millis() as u64, "request cancelled"),
    }
}

/// Reads one pipe to the end in the background, keeping whatever arrived.
struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl Capture {
    fn start<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let task = reader.map(|mut reader| {
            let buffer = Arc::clone(&buffer);
            tokio::spawn(async move {
                let mut chunk = [0u8; 8192];
                loop {
                    match reader.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => {
                            buffer
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .extend_from_slice(&chunk[..read]);
                        }
                    }
                }
            })
        });
        Self { buffer, task }
    }

    /// Waits for EOF, or at most `grace` when given, then decodes lossily.
    async fn finish(self, grace: Option<Duration>) -> String {
        if let Some(task) = self.task {
            match grace {
                None => {
                    let _ = task.await;
                }
                Some(limit) => {
                    if tokio::time::timeout(limit, task).await.is_err() {
                        debug!("pipe still open after kill; keeping partial output");
                    }
                }
            }
        }
        let bytes = std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner));
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(error) => String::from_utf8_lossy(error.as_bytes()).into_owned(),
        }
    }
}
