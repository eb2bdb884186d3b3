// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Background jobs with cooperative cancellation.
//!
//! Long type-system work (subtype enumeration for a type picker) runs on a
//! worker thread. The worker only computes; the owning thread receives the
//! [`JobOutcome`] and applies it to its document. A canceled job yields
//! [`JobOutcome::Canceled`] and nothing to apply. A worker that panics
//! yields [`JobOutcome::Panicked`], never a cancel.

use crate::types::{Monitor, TypeError, TypeHandle, TypeResolver};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use parking_lot::Mutex;
use std::any::Any;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Monitor for CancelToken {
    fn is_canceled(&self) -> bool {
        CancelToken::is_canceled(self)
    }
}

/// Snapshot of a running job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub task: String,
    pub worked: u64,
}

/// Monitor handed to a job: cancellation plus progress reporting.
#[derive(Debug, Default)]
pub struct ProgressMonitor {
    token: CancelToken,
    progress: Mutex<Progress>,
}

impl ProgressMonitor {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            progress: Mutex::new(Progress::default()),
        }
    }

    /// Name the current step.
    pub fn begin(&self, task: impl Into<String>) {
        self.progress.lock().task = task.into();
    }

    pub fn snapshot(&self) -> Progress {
        self.progress.lock().clone()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Monitor for ProgressMonitor {
    fn is_canceled(&self) -> bool {
        self.token.is_canceled()
    }

    fn worked(&self, units: u32) {
        self.progress.lock().worked += u64::from(units);
    }
}

/// Result of a finished job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome<T, E> {
    Done(T),
    Canceled,
    Failed(E),
    /// The worker panicked; holds the panic message.
    Panicked(String),
}

impl<T, E> JobOutcome<T, E> {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            _ => None,
        }
    }
}

/// Handle on a spawned job.
pub struct JobHandle<T, E> {
    name: String,
    monitor: Arc<ProgressMonitor>,
    rx: Receiver<JobOutcome<T, E>>,
    thread: Option<JoinHandle<()>>,
}

impl<T, E> JobHandle<T, E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request cancellation; the job stops at its next check.
    pub fn cancel(&self) {
        self.monitor.token().cancel();
    }

    pub fn progress(&self) -> Progress {
        self.monitor.snapshot()
    }

    /// Outcome if the job already finished.
    pub fn try_outcome(&mut self) -> Option<JobOutcome<T, E>> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.lost()),
        }
    }

    /// Block until the job finishes.
    pub fn wait(mut self) -> JobOutcome<T, E> {
        match self.rx.recv() {
            Ok(outcome) => {
                self.join();
                outcome
            }
            Err(_) => self.lost(),
        }
    }

    /// Block for at most `timeout`; `None` if the job is still running.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<JobOutcome<T, E>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.lost()),
        }
    }

    /// Outcome of a worker that dropped its sender without reporting.
    fn lost(&mut self) -> JobOutcome<T, E> {
        match self.join() {
            Some(message) => {
                log::error!("[jobs] '{}' panicked: {}", self.name, message);
                JobOutcome::Panicked(message)
            }
            None => {
                log::warn!("[jobs] '{}' exited without a result", self.name);
                JobOutcome::Canceled
            }
        }
    }

    /// Join the worker; returns the panic message if it panicked.
    fn join(&mut self) -> Option<String> {
        let handle = self.thread.take()?;
        handle.join().err().map(|payload| panic_message(payload.as_ref()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl<T, E> Drop for JobHandle<T, E> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.cancel();
        }
    }
}

/// Run `job` on a named worker thread.
///
/// A job that observes cancellation may return anything; its result is
/// discarded in favor of [`JobOutcome::Canceled`].
pub fn spawn_job<T, E, F>(name: &str, token: CancelToken, job: F) -> io::Result<JobHandle<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce(&ProgressMonitor) -> Result<T, E> + Send + 'static,
{
    let monitor = Arc::new(ProgressMonitor::new(token));
    let (tx, rx) = channel::bounded(1);
    let worker_monitor = monitor.clone();
    let job_name = name.to_string();

    let thread = thread::Builder::new()
        .name(format!("tde-job-{}", name))
        .spawn(move || {
            let result = job(&worker_monitor);
            let outcome = if worker_monitor.is_canceled() {
                log::debug!("[jobs] '{}' canceled", job_name);
                JobOutcome::Canceled
            } else {
                match result {
                    Ok(value) => JobOutcome::Done(value),
                    Err(e) => JobOutcome::Failed(e),
                }
            };
            let _ = tx.send(outcome);
        })?;

    Ok(JobHandle {
        name: name.to_string(),
        monitor,
        rx,
        thread: Some(thread),
    })
}

// ---------------------------------------------------------------------------
// Subtype search
// ---------------------------------------------------------------------------

/// Enumerates the instantiable subtypes of a type, for type pickers.
pub struct SubtypeSearch {
    resolver: Arc<dyn TypeResolver>,
    base: TypeHandle,
    include_abstract: bool,
}

impl SubtypeSearch {
    pub fn new(resolver: Arc<dyn TypeResolver>, base: TypeHandle) -> Self {
        Self {
            resolver,
            base,
            include_abstract: false,
        }
    }

    #[must_use]
    pub fn with_abstract(mut self, include: bool) -> Self {
        self.include_abstract = include;
        self
    }

    /// Run in the calling thread.
    pub fn run(&self, monitor: &dyn Monitor) -> Result<Vec<TypeHandle>, TypeError> {
        let mut types = self.resolver.subtypes_of(&self.base, monitor)?;
        if !self.include_abstract {
            types.retain(|t| !t.is_abstract());
        }
        Ok(types)
    }

    /// Run on a worker thread.
    pub fn spawn(self, token: CancelToken) -> io::Result<JobHandle<Vec<TypeHandle>, TypeError>> {
        let name = format!("subtypes-{}", self.base.simple_name());
        spawn_job(&name, token, move |monitor| {
            monitor.begin(format!("Searching subtypes of {}", self.base));
            self.run(monitor)
        })
    }
}
