//! # Main Window Controller
//!
//! Everything the main window does, minus the drawing. The egui front-end in
//! [`super::app`] reads this state every frame and forwards user actions to it;
//! tests drive it directly.
//!
//! ## Job lifecycle
//!
//! ```text
//!        start()                 PROGRESS >= 1.0
//!  Idle ─────────► Running ──────── STATUS Error ───────► Idle
//!                          ──────── stop() ─────────────►
//!                          ──────── worker ended ───────►
//! ```
//!
//! A worker thread that ends while the job is still running counts as a
//! failure, the same as `STATUS Error`.
//!
//! The running flag is owned here and only touched on the GUI thread. Worker
//! messages arrive on a channel and are applied by [`MainWindow::poll`], so no
//! widget state is ever mutated from the worker's thread.

use crate::config::WindowMode;
use crate::constants::{ERROR_STATUS_TEXT, GAUGE_RANGE};
use crate::logger::log;
use crate::notifier::{ControlMessage, Observable, WorkerMessage};
use crate::params::Parameters;
use crate::worker::{WorkerFactory, ERROR_STATUS};
use crossbeam_channel::{unbounded, Receiver};
use std::path::PathBuf;
use std::thread::JoinHandle;

/// Processing state of one row of the file list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Done,
    Failed,
}

/// One photo shown in the file list
#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub name: String,
    pub state: FileState,
}

/// Visible job state: progress gauge, status bar fields, file list, running flag
#[derive(Debug, Clone, Default)]
pub struct WindowState {
    gauge: u32,
    primary_status: String,
    secondary_status: String,
    files: Vec<FileRow>,
    running: bool,
}

impl WindowState {
    /// Apply one worker message to the visible state
    pub fn update(&mut self, message: WorkerMessage) {
        log::debug!("{:?}", message.to_fields());
        match message {
            WorkerMessage::Progress { status, fraction } => {
                self.gauge = (GAUGE_RANGE as f32 * fraction.clamp(0.0, 1.0)).round() as u32;
                self.primary_status = status;
                if fraction >= 1.0 {
                    log::debug!("Reached end of facemovie process");
                    self.running = false;
                }
            }
            WorkerMessage::Status(text) => {
                if text == ERROR_STATUS {
                    self.primary_status = ERROR_STATUS_TEXT.to_string();
                    self.gauge = 0;
                    self.running = false;
                }
                self.secondary_status = text;
            }
            WorkerMessage::FileAdd(name) => self.files.push(FileRow {
                name,
                state: FileState::Pending,
            }),
            WorkerMessage::FileDone { name, success } => {
                let state = if success { FileState::Done } else { FileState::Failed };
                let mut matched = false;
                for row in self.files.iter_mut().filter(|row| row.name == name) {
                    row.state = state;
                    matched = true;
                }
                if !matched {
                    log::debug!("No file entry for {}", name);
                }
            }
        }
    }

    /// Apply a message given as raw ordered fields; unknown shapes are logged and ignored
    pub fn update_fields<S: AsRef<str>>(&mut self, fields: &[S]) {
        match WorkerMessage::parse(fields) {
            Ok(message) => self.update(message),
            Err(e) => log::debug!("{}", e),
        }
    }

    /// Gauge position, between 0 and [`GAUGE_RANGE`]
    pub fn gauge(&self) -> u32 {
        self.gauge
    }

    /// Gauge position as a fraction, for progress widgets
    pub fn progress(&self) -> f32 {
        self.gauge as f32 / GAUGE_RANGE as f32
    }

    pub fn primary_status(&self) -> &str {
        &self.primary_status
    }

    pub fn secondary_status(&self) -> &str {
        &self.secondary_status
    }

    pub fn files(&self) -> &[FileRow] {
        &self.files
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Optional parts of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFeatures {
    /// Input folder, options, start/stop, progress, file list and status bar
    pub job_controls: bool,
    /// Settings dialog in the File menu
    pub settings: bool,
    /// Help menu linking to the online documentation
    pub help: bool,
}

impl From<WindowMode> for WindowFeatures {
    fn from(mode: WindowMode) -> Self {
        let full = mode == WindowMode::Full;
        Self {
            job_controls: full,
            settings: full,
            help: full,
        }
    }
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A job is already running; nothing was done
    AlreadyRunning,
    /// The worker thread could not be spawned
    LaunchFailed,
}

/// Result of an exit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Allowed,
    /// A job is running; the user must stop it first
    BlockedWhileRunning,
}

/// Main window logic: parameters, job control and the worker relay
pub struct MainWindow {
    params: Parameters,
    state: WindowState,
    features: WindowFeatures,
    factory: Box<dyn WorkerFactory>,
    controls: Observable<ControlMessage>,
    reports: Option<Receiver<WorkerMessage>>,
    worker_thread: Option<JoinHandle<()>>,
}

impl MainWindow {
    pub fn new(params: Parameters, features: WindowFeatures, factory: Box<dyn WorkerFactory>) -> Self {
        Self {
            params,
            state: WindowState::default(),
            features,
            factory,
            controls: Observable::new(),
            reports: None,
            worker_thread: None,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn features(&self) -> WindowFeatures {
        self.features
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Apply the result of the input folder picker; `None` means cancelled
    pub fn choose_input_folder(&mut self, choice: Option<PathBuf>) -> bool {
        match choice {
            Some(folder) => {
                self.params.set_input_folder(folder);
                true
            }
            None => false,
        }
    }

    /// Apply the result of the output folder picker; `None` means cancelled
    pub fn choose_output_folder(&mut self, choice: Option<PathBuf>) -> bool {
        match choice {
            Some(folder) => {
                self.params.set_output_folder(folder);
                true
            }
            None => false,
        }
    }

    /// Start a job with the current parameters unless one is already running
    pub fn start(&mut self) -> StartOutcome {
        log::debug!("start pressed");

        if self.state.running {
            log::error!("Cannot start, process already running !");
            return StartOutcome::AlreadyRunning;
        }

        self.state.files.clear();

        let job = self.params.to_job();
        self.params.log_parameters();

        let mut worker = self.factory.create(job);
        let (reports_tx, reports_rx) = unbounded();
        worker.subscribe(reports_tx);

        let mut controls = Observable::new();
        controls.subscribe(worker.observer());

        match worker.start() {
            Ok(handle) => {
                self.controls = controls;
                self.reports = Some(reports_rx);
                self.worker_thread = Some(handle);
                self.state.running = true;
                StartOutcome::Started
            }
            Err(e) => {
                log::error!("Failed to start worker: {}", e);
                self.state.primary_status = ERROR_STATUS_TEXT.to_string();
                self.state.gauge = 0;
                StartOutcome::LaunchFailed
            }
        }
    }

    /// Ask the worker to stop and go idle without waiting for it
    pub fn stop(&mut self) {
        log::debug!("Stop pressed");
        let delivered = self.controls.publish(ControlMessage::Stop);
        log::debug!("{} sent to {} worker(s)", ControlMessage::Stop, delivered);
        self.state.running = false;
    }

    /// Apply every worker message received since the last call.
    ///
    /// Returns the number of messages applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = self.drain_reports();

        if self.worker_thread.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = self.worker_thread.take() {
                if handle.join().is_err() {
                    log::error!("Worker thread panicked");
                } else {
                    log::debug!("Worker thread finished");
                }
            }

            // Messages sent right before the thread ended
            applied += self.drain_reports();
            if self.state.running {
                log::warn!("Worker ended without reporting completion");
                self.state.update(WorkerMessage::Status(ERROR_STATUS.to_string()));
            }
        }

        applied
    }

    fn drain_reports(&mut self) -> usize {
        let mut applied = 0;
        if let Some(reports) = &self.reports {
            for message in reports.try_iter() {
                self.state.update(message);
                applied += 1;
            }
        }
        applied
    }

    /// Whether the application may quit now
    pub fn request_exit(&self) -> ExitDecision {
        log::debug!("Exit pressed");
        if self.state.running {
            ExitDecision::BlockedWhileRunning
        } else {
            ExitDecision::Allowed
        }
    }
}
