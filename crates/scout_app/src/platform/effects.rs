use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use scout_core::{Effect, Msg};
use scout_engine::{EngineEvent, EngineHandle};
use scout_logging::{scout_debug, scout_info, scout_warn};

/// Executes core effects against the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartScan { run_id, candidates } => {
                    scout_info!(
                        "StartScan run_id={} candidates={}",
                        run_id,
                        candidates.len()
                    );
                    self.engine.start_run(run_id, candidates);
                }
                Effect::CancelScan { run_id } => {
                    scout_info!("CancelScan run_id={}", run_id);
                    self.engine.cancel_run(run_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(Duration::from_millis(50)) {
                Ok(event) => event,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    scout_warn!("probe engine disconnected; event forwarding stopped");
                    break;
                }
            };
            let msg = match event {
                EngineEvent::Progress(progress) => {
                    scout_debug!(
                        "run {} progress {}/{}",
                        progress.run_id,
                        progress.processed,
                        progress.total
                    );
                    Msg::ScanProgress {
                        run_id: progress.run_id,
                        percent: progress.percent,
                    }
                }
                EngineEvent::RunFinished { run_id, outcome } => {
                    Msg::ScanFinished { run_id, outcome }
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}
