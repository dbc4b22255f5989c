use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use log::LevelFilter;
use scout_core::{
    generate, prepare_name, update, AppState, AppViewModel, CategoryCode, Msg, SessionState,
};
use scout_engine::{AssetDownloader, AtomicFileWriter, EngineHandle};
use scout_logging::{scout_info, scout_warn};

use super::args::{CliArgs, Command};
use super::config::{load_config, ScoutConfig};
use super::effects::EffectRunner;
use super::repl::{parse_command, ReplCommand, HELP};
use super::{export, logging, render};

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let (config, source) = load_config(args.config.as_deref());
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()
    };
    logging::initialize(args.log.into(), level);
    source.log();

    match args.command {
        Command::Categories => print_lines(render::render_categories()),
        Command::Generate { name, category } => {
            let name = prepare_name(&name)?;
            print_lines(render::render_candidates(&generate(&name, category)));
        }
        Command::Scan {
            name,
            category,
            region,
            copy_category,
            json,
            export,
            download,
        } => run_scan(
            &config,
            ScanRequest {
                name,
                category,
                region,
                copy_category,
                json,
                export,
                download,
            },
        )?,
        Command::Interactive => run_interactive(&config)?,
    }
    Ok(())
}

struct ScanRequest {
    name: String,
    category: CategoryCode,
    region: Option<String>,
    copy_category: Option<String>,
    json: bool,
    export: Option<PathBuf>,
    download: Option<PathBuf>,
}

/// Owns the session state and routes messages through `update` and the effect runner.
struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Session {
    fn new(config: &ScoutConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config.probe_settings(), config.batch_settings())
            .context("failed to start the probe engine")?;
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(engine, msg_tx);
        Ok(Self {
            state: AppState::new(),
            runner,
            msg_rx,
        })
    }

    /// Applies `msg`, runs its effects, and returns whether a re-render is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        self.state.consume_dirty()
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }
}

fn run_scan(config: &ScoutConfig, request: ScanRequest) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;
    session.dispatch(Msg::NameChanged(request.name.clone()));
    session.dispatch(Msg::CategorySelected(request.category));
    if session.state.session() == SessionState::Error {
        bail!(session.view().status_text);
    }

    let mut stderr = io::stderr();
    while session.state.session() == SessionState::Scanning {
        let msg = session
            .msg_rx
            .recv()
            .context("probe engine stopped unexpectedly")?;
        if session.dispatch(msg) && session.state.session() == SessionState::Scanning {
            let _ = write!(stderr, "\r{}", render::status_line(&session.view()));
            let _ = stderr.flush();
        }
    }
    let _ = writeln!(stderr, "\r{}", render::status_line(&session.view()));

    session.dispatch(Msg::RegionFilterSelected(request.region.clone()));
    let view = session.view();

    if let Some(label) = &request.copy_category {
        println!("{}", view.copy_text(Some(label)));
    } else if request.json {
        println!("{}", export::results_json(&view)?);
    } else {
        print_lines(render::render_results(&view));
    }

    if let Some(path) = &request.export {
        let doc = export::links_document(&view, request.copy_category.as_deref(), Utc::now());
        let written = export::write_links(path, &doc)?;
        scout_info!("exported {} links to {:?}", view.results.len(), written);
        eprintln!("Links written to {}", written.display());
    }

    if let Some(dir) = &request.download {
        let items = export::visible_results(session.state.results(), request.region.as_deref());
        download_assets(config, &items, dir.clone())?;
    }
    Ok(())
}

fn download_assets(
    config: &ScoutConfig,
    items: &[scout_core::ValidatedCandidate],
    dir: PathBuf,
) -> anyhow::Result<()> {
    let downloader = AssetDownloader::new(&config.probe_settings())
        .context("failed to build the download client")?;
    let writer = AtomicFileWriter::new(dir);
    let runtime = tokio::runtime::Runtime::new().context("failed to start download runtime")?;
    let report = runtime.block_on(downloader.download_all(items, &writer));

    eprintln!(
        "Saved {} of {} assets to {}",
        report.saved.len(),
        items.len(),
        writer.dir().display()
    );
    for (url, err) in &report.failed {
        eprintln!("  failed {url}: {err}");
    }
    Ok(())
}

fn run_interactive(config: &ScoutConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;
    let (input_tx, input_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("asset-scout interactive session. Type `help` for commands.");
    let mut last_session = session.state.session();
    loop {
        // Engine messages first, so a `copy` right after completion sees the results.
        while let Ok(msg) = session.msg_rx.try_recv() {
            if session.dispatch(msg) {
                last_session = report_change(&session.view(), last_session);
            }
        }

        let line = match input_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ReplCommand::Send(msg) => {
                if session.dispatch(msg) {
                    last_session = report_change(&session.view(), last_session);
                }
            }
            ReplCommand::Copy(label) => println!("{}", session.view().copy_text(label.as_deref())),
            ReplCommand::Results => print_lines(render::render_results(&session.view())),
            ReplCommand::Status => println!("{}", render::status_line(&session.view())),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
        }
    }

    if let Some(run_id) = session.state.active_run() {
        scout_warn!("leaving with run {} still active; cancelling", run_id);
        session.dispatch(Msg::CancelClicked);
    }
    Ok(())
}

/// Prints what changed and returns the session state now shown.
fn report_change(view: &AppViewModel, previous: SessionState) -> SessionState {
    match view.session {
        SessionState::Complete if previous != SessionState::Complete => {
            println!("{}", render::status_line(view));
            print_lines(render::render_results(view));
        }
        SessionState::Complete => print_lines(render::render_results(view)),
        _ => println!("{}", render::status_line(view)),
    }
    view.session
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
