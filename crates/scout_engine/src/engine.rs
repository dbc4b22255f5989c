use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use scout_core::{Candidate, RunId};
use scout_logging::{scout_info, scout_warn};
use tokio::task::JoinHandle;

use crate::validate::{validate, BatchSettings, ChannelProgressSink, RunContext};
use crate::{EngineError, EngineEvent, ProbeSettings, Prober, ReqwestProber};

enum EngineCommand {
    StartRun {
        run_id: RunId,
        candidates: Vec<Candidate>,
    },
    CancelRun {
        run_id: RunId,
    },
}

struct ActiveRun {
    ctx: RunContext,
    task: JoinHandle<()>,
}

/// Handle to the background validation runtime. At most one run is in flight.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(probe: ProbeSettings, batch: BatchSettings) -> Result<Self, EngineError> {
        let prober = ReqwestProber::new(probe)?;
        Self::with_prober(Arc::new(prober), batch)
    }

    pub fn with_prober(prober: Arc<dyn Prober>, batch: BatchSettings) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut active: Option<ActiveRun> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartRun { run_id, candidates } => {
                        let previous = active.take().map(|run| {
                            run.ctx.cancel();
                            run.task
                        });
                        let ctx = RunContext::new(run_id);
                        let task = runtime.spawn(drive_run(
                            prober.clone(),
                            candidates,
                            batch,
                            ctx.clone(),
                            previous,
                            event_tx.clone(),
                        ));
                        active = Some(ActiveRun { ctx, task });
                    }
                    EngineCommand::CancelRun { run_id } => match &active {
                        Some(run) if run.ctx.run_id() == run_id => {
                            scout_info!("cancel requested for run {}", run_id);
                            run.ctx.cancel();
                        }
                        _ => scout_warn!("cancel for unknown run {} ignored", run_id),
                    },
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    /// Starts `run_id`, cancelling whatever run was active before it.
    pub fn start_run(&self, run_id: RunId, candidates: Vec<Candidate>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartRun { run_id, candidates });
    }

    pub fn cancel_run(&self, run_id: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelRun { run_id });
    }

    /// Next pending event. A poisoned receiver reports as disconnected.
    pub fn try_recv(&self) -> Result<EngineEvent, mpsc::TryRecvError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::TryRecvError::Disconnected)?
            .try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }
}

async fn drive_run(
    prober: Arc<dyn Prober>,
    candidates: Vec<Candidate>,
    batch: BatchSettings,
    ctx: RunContext,
    previous: Option<JoinHandle<()>>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    // The abandoned run finishes its current batch first; never interleave two runs.
    if let Some(previous) = previous {
        let _ = previous.await;
    }
    let sink = ChannelProgressSink::new(event_tx.clone());
    let outcome = validate(prober.as_ref(), candidates, &batch, &ctx, &sink).await;
    let _ = event_tx.send(EngineEvent::RunFinished {
        run_id: ctx.run_id(),
        outcome,
    });
}
