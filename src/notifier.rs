//! # Window / Worker Notifications
//!
//! The window and the worker each publish messages the other side subscribes to:
//!
//! ```text
//!  ┌──────────────┐   WorkerMessage (PROGRESS, STATUS,   ┌──────────────┐
//!  │    Worker    │ ───────── FILEADD, FILEDONE) ──────► │ Main Window  │
//!  │ (own thread) │ ◄──────── ControlMessage (STOP) ──── │ (GUI thread) │
//!  └──────────────┘                                      └──────────────┘
//! ```
//!
//! Messages are closed enums. On the wire (the external processor's stdout) a
//! message is one line of tab-separated fields such as `PROGRESS\tSaving\t0.5`;
//! [`WorkerMessage::parse`] turns the field list into the typed form and rejects
//! every other shape.
//!
//! [`Observable`] is the publishing side: observers subscribe with a channel
//! sender, and `publish` fans a message out to each of them. Delivery is a
//! channel push, so the receiving side decides on which thread and when the
//! message is handled.

use crossbeam_channel::Sender;
use std::fmt;

/// Progress notification sent by a worker to the window
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Big step performed; `fraction` of the whole job is done (0.0 - 1.0)
    Progress { status: String, fraction: f32 },
    /// Secondary status text; the exact text `Error` aborts the job
    Status(String),
    /// A photo entered the job
    FileAdd(String),
    /// A photo finished processing, successfully or not
    FileDone { name: String, success: bool },
}

/// Field list that does not form a known message
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedMessage(pub Vec<String>);

impl fmt::Display for UnrecognizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized command: {:?}", self.0)
    }
}

impl std::error::Error for UnrecognizedMessage {}

impl WorkerMessage {
    pub const PROGRESS: &'static str = "PROGRESS";
    pub const STATUS: &'static str = "STATUS";
    pub const FILEADD: &'static str = "FILEADD";
    pub const FILEDONE: &'static str = "FILEDONE";

    /// Build a message from its ordered fields.
    ///
    /// Accepted shapes are `[PROGRESS, text, fraction]`, `[STATUS, text]`,
    /// `[FILEADD, name]` and `[FILEDONE, name, 1|0]`. A `FILEDONE` flag other
    /// than `1` counts as a failure.
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, UnrecognizedMessage> {
        let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        let message = match fields.as_slice() {
            [Self::PROGRESS, status, fraction] => fraction
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|fraction| WorkerMessage::Progress {
                    status: status.to_string(),
                    fraction,
                }),
            [Self::STATUS, text] => Some(WorkerMessage::Status(text.to_string())),
            [Self::FILEADD, name] => Some(WorkerMessage::FileAdd(name.to_string())),
            [Self::FILEDONE, name, flag] => Some(WorkerMessage::FileDone {
                name: name.to_string(),
                success: flag.trim() == "1",
            }),
            _ => None,
        };
        message.ok_or_else(|| UnrecognizedMessage(fields.iter().map(|f| f.to_string()).collect()))
    }

    /// Parse one tab-separated wire line
    pub fn from_line(line: &str) -> Result<Self, UnrecognizedMessage> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        Self::parse(&fields)
    }

    /// Ordered field form, as written on the wire
    pub fn to_fields(&self) -> Vec<String> {
        match self {
            WorkerMessage::Progress { status, fraction } => {
                vec![Self::PROGRESS.into(), status.clone(), fraction.to_string()]
            }
            WorkerMessage::Status(text) => vec![Self::STATUS.into(), text.clone()],
            WorkerMessage::FileAdd(name) => vec![Self::FILEADD.into(), name.clone()],
            WorkerMessage::FileDone { name, success } => vec![
                Self::FILEDONE.into(),
                name.clone(),
                if *success { "1" } else { "0" }.into(),
            ],
        }
    }
}

/// Control request sent by the window to a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Cooperative cancellation; the worker stops at its next opportunity
    Stop,
}

impl ControlMessage {
    /// Name of the publishing side, logged with every control message
    pub const ORIGIN: &'static str = "Application";

    pub fn command(&self) -> &'static str {
        match self {
            ControlMessage::Stop => "STOP",
        }
    }
}

impl fmt::Display for ControlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, [{}]]", Self::ORIGIN, self.command())
    }
}

/// Publishing side of a notification channel
#[derive(Debug)]
pub struct Observable<M> {
    observers: Vec<Sender<M>>,
}

impl<M> Default for Observable<M> {
    fn default() -> Self {
        Self { observers: Vec::new() }
    }
}

impl<M: Clone> Observable<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; every later `publish` reaches it
    pub fn subscribe(&mut self, observer: Sender<M>) {
        self.observers.push(observer);
    }

    /// Deliver `message` to every observer, forgetting the ones that hung up.
    ///
    /// Returns how many observers received it.
    pub fn publish(&mut self, message: M) -> usize {
        self.observers.retain(|observer| observer.send(message.clone()).is_ok());
        self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
