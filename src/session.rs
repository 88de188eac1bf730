use anyhow::{bail, Result};
use tracing::debug;

use crate::{
    command::CommandGenerator,
    diff::{diff_bodies, DiffLine},
    executor::Executor,
    history::HistoryEntry,
    options::RequestOptions,
    response::Response,
};

/// One request being edited and sent, plus the two diff slots.
///
/// All state changes go through methods here; the executor inside is the
/// only part shared with other tasks (see [`RequestSession::canceller`]).
#[derive(Debug, Default)]
pub struct RequestSession {
    options: RequestOptions,
    generator: CommandGenerator,
    executor: Executor,
    response: Option<Response>,
    diff_left: Option<Response>,
    diff_right: Option<Response>,
}

impl RequestSession {
    pub fn new(generator: CommandGenerator, executor: Executor) -> Self {
        Self {
            generator,
            executor,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }

    /// The command exactly as the options describe it.
    pub fn command_preview(&self) -> String {
        self.generator.command(&self.options)
    }

    /// The command `send` runs: headers are always included so they can be
    /// split from the body, unless the request is HEAD-only.
    pub fn execution_command(&self) -> String {
        let options = self.options.with(|options| {
            if !options.output.head_only {
                options.output.include_headers = true;
            }
        });
        self.generator.command(&options)
    }

    /// Executes a snapshot of the current options and keeps the response.
    pub async fn send(&mut self) -> Result<&Response> {
        if self.options.url.trim().is_empty() {
            bail!("request has no URL");
        }
        self.response = None;
        let command = self.execution_command();
        debug!(command = %command, "sending request");
        let response = self.executor.execute(&command).await;
        Ok(self.response.insert(response))
    }

    /// A handle that can cancel an in-flight `send` from another task.
    pub fn canceller(&self) -> Executor {
        self.executor.clone()
    }

    pub fn cancel(&self) -> bool {
        self.executor.cancel()
    }

    pub fn is_running(&self) -> bool {
        self.executor.is_running()
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Starts a new request: default options and no response. Diff slots stay.
    pub fn reset(&mut self) {
        self.options = RequestOptions::default();
        self.response = None;
    }

    pub fn load_from_history(&mut self, entry: &HistoryEntry) {
        entry.apply_to(&mut self.options);
    }

    /// Uses the current response as the left side. False when there is none.
    pub fn set_diff_left(&mut self) -> bool {
        assign(&mut self.diff_left, self.response.clone())
    }

    pub fn set_diff_right(&mut self) -> bool {
        assign(&mut self.diff_right, self.response.clone())
    }

    pub fn set_diff_left_from(&mut self, entry: &HistoryEntry) -> bool {
        assign(&mut self.diff_left, entry.to_response())
    }

    pub fn set_diff_right_from(&mut self, entry: &HistoryEntry) -> bool {
        assign(&mut self.diff_right, entry.to_response())
    }

    pub fn diff_left(&self) -> Option<&Response> {
        self.diff_left.as_ref()
    }

    pub fn diff_right(&self) -> Option<&Response> {
        self.diff_right.as_ref()
    }

    pub fn clear_diff(&mut self) {
        self.diff_left = None;
        self.diff_right = None;
    }

    /// Diff of the two bodies once both slots are filled.
    pub fn diff(&self) -> Option<Vec<DiffLine>> {
        let left = self.diff_left.as_ref()?;
        let right = self.diff_right.as_ref()?;
        Some(diff_bodies(&left.body, &right.body))
    }
}

// An empty source leaves the slot as it was.
fn assign(slot: &mut Option<Response>, value: Option<Response>) -> bool {
    match value {
        Some(response) => {
            *slot = Some(response);
            true
        }
        None => false,
    }
}
