//! # Background Job Worker
//!
//! A worker runs one photo-processing job on its own thread. It publishes
//! [`WorkerMessage`]s to whoever subscribed and listens for [`ControlMessage`]s
//! on the sender it hands out through [`Worker::observer`].
//!
//! The processing itself (face detection, cropping, video assembly) lives in an
//! external processor. [`CommandWorker`] launches it with the job descriptor as
//! command-line arguments and relays its output:
//!
//! - each stdout line is a tab-separated message (`FILEADD\tIMG_0001.jpg`)
//! - a `STOP` line on its stdin asks it to wind down
//! - anything it prints on stderr goes to the log
//!
//! Output is decoded lossily, so a photo name that is not valid UTF-8 still
//! gets through. A launch failure, or a processor that exits before reporting
//! completion, is reported as `STATUS Error` so the window goes back to idle.

use crate::config::IvolutionConfig;
use crate::logger::log;
use crate::notifier::{ControlMessage, Observable, WorkerMessage};
use crate::params::JobDescriptor;
use crossbeam_channel::{never, select, unbounded, Receiver, Sender};
use std::io::{self, BufRead, BufReader, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};

/// Text of the status message that marks a failed job
pub const ERROR_STATUS: &str = "Error";

/// A background job the window can start, observe and stop
pub trait Worker: Send {
    /// Register an observer for progress messages
    fn subscribe(&mut self, observer: Sender<WorkerMessage>);

    /// Sender on which this worker receives control messages
    fn observer(&self) -> Sender<ControlMessage>;

    /// Run the job on a new thread
    fn start(self: Box<Self>) -> io::Result<JoinHandle<()>>;
}

/// Builds a worker for each started job
pub trait WorkerFactory {
    fn create(&self, job: JobDescriptor) -> Box<dyn Worker>;
}

/// Worker driving the external processor as a child process
pub struct CommandWorker {
    program: String,
    extra_args: Vec<String>,
    job: JobDescriptor,
    reports: Observable<WorkerMessage>,
    control_tx: Sender<ControlMessage>,
    control_rx: Receiver<ControlMessage>,
}

impl CommandWorker {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>, job: JobDescriptor) -> Self {
        let (control_tx, control_rx) = unbounded();
        Self {
            program: program.into(),
            extra_args,
            job,
            reports: Observable::new(),
            control_tx,
            control_rx,
        }
    }

    fn run(self) {
        let CommandWorker {
            program,
            extra_args,
            job,
            mut reports,
            control_tx,
            control_rx,
        } = self;
        drop(control_tx);

        log::info!("Launching {} for {}", program, job.input_folder.display());
        let spawned = Command::new(&program)
            .args(&extra_args)
            .args(job.to_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to launch {}: {}", program, e);
                reports.publish(WorkerMessage::Status(ERROR_STATUS.to_string()));
                return;
            }
        };

        let mut stdin = child.stdin.take();
        let (line_tx, line_rx) = unbounded();
        if let Some(stdout) = child.stdout.take() {
            thread::spawn(move || relay_stdout(stdout, line_tx));
        }
        if let Some(stderr) = child.stderr.take() {
            let label = program.clone();
            thread::spawn(move || {
                for_each_line(stderr, |line| log::warn!("{}: {}", label, line));
            });
        }

        let mut control = control_rx;
        let mut completed = false;
        let mut failed = false;
        let mut stopped = false;

        loop {
            let pending = control.clone();
            select! {
                recv(line_rx) -> message => match message {
                    Ok(message) => {
                        match &message {
                            WorkerMessage::Progress { fraction, .. } if *fraction >= 1.0 => completed = true,
                            WorkerMessage::Status(text) if text == ERROR_STATUS => failed = true,
                            _ => {}
                        }
                        reports.publish(message);
                    }
                    Err(_) => break,
                },
                recv(pending) -> request => match request {
                    Ok(ControlMessage::Stop) => {
                        log::info!("Received {}, asking processor to stop", ControlMessage::Stop);
                        stopped = true;
                        send_stop(&mut stdin);
                    }
                    Err(_) => control = never(),
                },
            }
        }

        match child.wait() {
            Ok(status) if status.success() => log::info!("Processor exited normally"),
            Ok(status) => log::error!("Processor exited with {}", status),
            Err(e) => log::error!("Failed to wait for processor: {}", e),
        }

        if !completed && !failed && !stopped {
            log::error!("Processor ended without completing the job");
            reports.publish(WorkerMessage::Status(ERROR_STATUS.to_string()));
        }
    }
}

impl Worker for CommandWorker {
    fn subscribe(&mut self, observer: Sender<WorkerMessage>) {
        self.reports.subscribe(observer);
    }

    fn observer(&self) -> Sender<ControlMessage> {
        self.control_tx.clone()
    }

    fn start(self: Box<Self>) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("facemovie".to_string())
            .spawn(move || self.run())
    }
}

/// Call `handle` with every line of `output` until the pipe closes
fn for_each_line(output: impl io::Read, mut handle: impl FnMut(&str)) {
    try_for_each_line(output, |line| {
        handle(line);
        true
    });
}

/// Lines are decoded lossily; stops early when `handle` returns `false`
fn try_for_each_line(output: impl io::Read, mut handle: impl FnMut(&str) -> bool) {
    let mut reader = BufReader::new(output);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if !handle(line.trim_end_matches(['\r', '\n'])) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("Lost processor output: {}", e);
                break;
            }
        }
    }
}

/// Parse processor output into messages until the pipe closes
fn relay_stdout(stdout: impl io::Read, messages: Sender<WorkerMessage>) {
    try_for_each_line(stdout, |line| {
        if line.trim().is_empty() {
            return true;
        }
        match WorkerMessage::from_line(line) {
            Ok(message) => messages.send(message).is_ok(),
            Err(e) => {
                log::debug!("{}", e);
                true
            }
        }
    });
}

fn send_stop(stdin: &mut Option<ChildStdin>) {
    if let Some(pipe) = stdin.as_mut() {
        let written = writeln!(pipe, "{}", ControlMessage::Stop.command()).and_then(|_| pipe.flush());
        if let Err(e) = written {
            log::warn!("Could not deliver stop request: {}", e);
        }
    }
    // Closing stdin signals end of input to processors that ignore the STOP line
    stdin.take();
}

/// Builds [`CommandWorker`]s from the configured processor command
#[derive(Debug, Clone)]
pub struct CommandWorkerFactory {
    program: String,
    extra_args: Vec<String>,
}

impl CommandWorkerFactory {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    pub fn from_config(config: &IvolutionConfig) -> Self {
        Self::new(config.worker_command.clone(), config.worker_args.clone())
    }
}

impl WorkerFactory for CommandWorkerFactory {
    fn create(&self, job: JobDescriptor) -> Box<dyn Worker> {
        Box::new(CommandWorker::new(self.program.clone(), self.extra_args.clone(), job))
    }
}
