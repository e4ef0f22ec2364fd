//! Debounced background saving.
//!
//! ```text
//!  notify(t1) notify(t2)          notify(t3)
//!  ──┬─────────┬──────────────────────┬───────── quiet ─────────┬──▶
//!    Pending   Pending                Pending                   Saving → Saved
//!                                                              (writes t3)
//! ```
//!
//! A write happens only after `debounce` passes without a newer snapshot,
//! and always writes the latest one. A failed write leaves the in-memory
//! template alone. The failed snapshot is kept and written by the next
//! `flush`, unless a newer snapshot replaces it first.

use crate::{save_template, BridgeError, BridgeResult, ContentStore};
use chrono::{DateTime, Utc};
use pagecraft_document::Template;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SaveStatus {
    Idle,
    Pending,
    Saving,
    Saved { at: DateTime<Utc> },
    Failed { message: String },
}

enum Command {
    Snapshot(Template),
    Flush(oneshot::Sender<BridgeResult<()>>),
}

/// Handle to a running autosave task. Dropping it aborts any pending write.
pub struct AutosaveHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SaveStatus>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Spawn the autosave task on the current tokio runtime
    pub fn spawn(store: Arc<dyn ContentStore>, page_id: impl Into<String>, debounce: Duration) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(SaveStatus::Idle);

        let worker = Worker {
            store,
            page_id: page_id.into(),
            debounce,
            status: status_tx,
        };
        let task = tokio::spawn(worker.run(rx));

        Self {
            commands,
            status,
            task,
        }
    }

    /// Queue the latest template; restarts the quiet period
    pub fn notify(&self, template: Template) {
        if self.commands.send(Command::Snapshot(template)).is_err() {
            tracing::debug!("Autosave task stopped, snapshot dropped");
        }
    }

    /// Write the pending (or last failed) snapshot now. Succeeds trivially if
    /// there is nothing to write.
    pub async fn flush(&self) -> BridgeResult<()> {
        let (reply, done) = oneshot::channel();
        self.commands
            .send(Command::Flush(reply))
            .map_err(|_| BridgeError::Store("autosave task stopped".to_string()))?;
        done.await
            .map_err(|_| BridgeError::Store("autosave task stopped".to_string()))?
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    /// Stop the task, discarding any pending snapshot
    pub fn cancel(self) {
        tracing::debug!("Autosave cancelled");
        self.task.abort();
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Worker {
    store: Arc<dyn ContentStore>,
    page_id: String,
    debounce: Duration,
    status: watch::Sender<SaveStatus>,
}

impl Worker {
    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let mut pending: Option<Template> = None;
        // Last snapshot whose write failed; kept until a write succeeds
        let mut failed: Option<Template> = None;

        loop {
            let command = if pending.is_some() {
                tokio::select! {
                    command = commands.recv() => command,
                    _ = tokio::time::sleep(self.debounce) => {
                        if let Some(template) = pending.take() {
                            let _ = self.write_or_keep(template, &mut failed).await;
                        }
                        continue;
                    }
                }
            } else {
                commands.recv().await
            };

            match command {
                Some(Command::Snapshot(template)) => {
                    pending = Some(template);
                    failed = None;
                    self.status.send_replace(SaveStatus::Pending);
                }
                Some(Command::Flush(reply)) => {
                    let result = match pending.take().or_else(|| failed.take()) {
                        Some(template) => self.write_or_keep(template, &mut failed).await,
                        None => Ok(()),
                    };
                    let _ = reply.send(result);
                }
                None => break,
            }
        }
    }

    async fn write_or_keep(&self, template: Template, failed: &mut Option<Template>) -> BridgeResult<()> {
        let result = self.write(&template).await;
        if result.is_err() {
            *failed = Some(template);
        }
        result
    }

    async fn write(&self, template: &Template) -> BridgeResult<()> {
        self.status.send_replace(SaveStatus::Saving);
        match save_template(self.store.as_ref(), &self.page_id, template).await {
            Ok(()) => {
                self.status.send_replace(SaveStatus::Saved { at: Utc::now() });
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Autosave of page {} failed: {}", self.page_id, e);
                self.status.send_replace(SaveStatus::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
