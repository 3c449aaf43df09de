//! Worker thread for the fidx core operations.
//!
//! The companion run is the only long operation fidx performs, so it happens on a
//! dedicated process worker. Requests [WorkerTask] come in from the AppState via a
//! channel and exactly one [WorkerResponse] goes back per request.
//!
//! # Caution:
//! This module is a protocol boundary. Adding or editing variants requires matching
//! changes in the response handling of app/state.rs.

use crate::config::CompanionConfig;
use crate::core::proc::{InvokeError, InvokeRequest, Summary, invoke};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::thread;

/// Manages the worker thread channels.
pub struct Workers {
    process_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Create the worker set.
    ///
    /// Spawns the process worker thread.
    pub fn spawn() -> Self {
        let (process_tx, process_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_process_worker(process_rx, res_tx);

        Self {
            process_tx,
            response_rx,
        }
    }

    /// Accessor for the process worker task sender.
    pub fn process_tx(&self) -> &Sender<WorkerTask> {
        &self.process_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker thread via channel.
#[derive(Debug)]
pub enum WorkerTask {
    RunCompanion {
        request: InvokeRequest,
        companion: CompanionConfig,
        request_id: u64,
    },
}

/// Responses sent from the worker thread back to the main thread via the channel.
#[derive(Debug)]
pub enum WorkerResponse {
    ProcessComplete {
        result: Result<Summary, InvokeError>,
        request_id: u64,
    },
}

/// Starts the process worker thread, which runs each companion request to completion.
///
/// # Arguments
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for outgoing responses
fn start_process_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::RunCompanion {
                request,
                companion,
                request_id,
            } = task;

            let result = invoke(&request, &companion);
            if res_tx
                .send(WorkerResponse::ProcessComplete { result, request_id })
                .is_err()
            {
                // receiver gone: the app is shutting down
                break;
            }
        }
    });
}
