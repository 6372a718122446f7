use crossbeam_channel::{unbounded, Receiver, Sender};
use ivolution::gui::controller::{
    ExitDecision, FileState, MainWindow, StartOutcome, WindowFeatures, WindowState,
};
use ivolution::config::WindowMode;
use ivolution::constants::{ERROR_STATUS_TEXT, GAUGE_RANGE};
use ivolution::logger;
use ivolution::notifier::{ControlMessage, Observable, WorkerMessage};
use ivolution::params::{JobDescriptor, Parameters};
use ivolution::worker::{Worker, WorkerFactory};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        let dir = std::env::temp_dir().join("ivolution-relay-tests");
        let _ = logger::init_logger_in(&dir);
    });
}

/// Worker that publishes a fixed script, then waits for a stop request
/// unless `ends_early` is set
struct ScriptedWorker {
    script: Vec<WorkerMessage>,
    ends_early: bool,
    reports: Observable<WorkerMessage>,
    control_tx: Sender<ControlMessage>,
    control_rx: Receiver<ControlMessage>,
    stops: Arc<AtomicUsize>,
}

impl Worker for ScriptedWorker {
    fn subscribe(&mut self, observer: Sender<WorkerMessage>) {
        self.reports.subscribe(observer);
    }

    fn observer(&self) -> Sender<ControlMessage> {
        self.control_tx.clone()
    }

    fn start(self: Box<Self>) -> io::Result<JoinHandle<()>> {
        let ScriptedWorker { script, ends_early, mut reports, control_rx, stops, .. } = *self;
        Ok(thread::spawn(move || {
            for message in script {
                reports.publish(message);
            }
            if ends_early {
                return;
            }
            if let Ok(ControlMessage::Stop) = control_rx.recv_timeout(Duration::from_secs(5)) {
                stops.fetch_add(1, Ordering::SeqCst);
            }
        }))
    }
}

#[derive(Default)]
struct ScriptedFactory {
    script: Vec<WorkerMessage>,
    ends_early: bool,
    created: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    jobs: Arc<Mutex<Vec<JobDescriptor>>>,
}

impl WorkerFactory for ScriptedFactory {
    fn create(&self, job: JobDescriptor) -> Box<dyn Worker> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.jobs.lock().unwrap().push(job);
        let (control_tx, control_rx) = unbounded();
        Box::new(ScriptedWorker {
            script: self.script.clone(),
            ends_early: self.ends_early,
            reports: Observable::new(),
            control_tx,
            control_rx,
            stops: self.stops.clone(),
        })
    }
}

fn window_with(factory: ScriptedFactory) -> MainWindow {
    MainWindow::new(
        Parameters::with_home(Path::new("/home/tester")),
        WindowFeatures::from(WindowMode::Full),
        Box::new(factory),
    )
}

/// Poll until `done` holds or two seconds pass
fn poll_until(window: &mut MainWindow, done: impl Fn(&MainWindow) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !done(window) && Instant::now() < deadline {
        window.poll();
        thread::sleep(Duration::from_millis(5));
    }
}

fn wait_for(counter: &AtomicUsize, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while counter.load(Ordering::SeqCst) < expected && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_completion_clears_running_and_fills_gauge() {
    setup();
    let factory = ScriptedFactory {
        script: vec![WorkerMessage::Progress { status: "done".into(), fraction: 1.0 }],
        ..Default::default()
    };
    let mut window = window_with(factory);
    assert_eq!(window.start(), StartOutcome::Started);
    assert!(window.is_running());

    poll_until(&mut window, |w| !w.is_running());
    assert!(!window.is_running());
    assert_eq!(window.state().gauge(), GAUGE_RANGE);
    assert_eq!(window.state().primary_status(), "done");
    window.stop();
}

#[test]
fn test_worker_ending_early_is_an_error() {
    setup();
    let factory = ScriptedFactory {
        script: vec![
            WorkerMessage::FileAdd("a.jpg".into()),
            WorkerMessage::Progress { status: "Searching faces".into(), fraction: 0.4 },
        ],
        ends_early: true,
        ..Default::default()
    };
    let mut window = window_with(factory);
    assert_eq!(window.start(), StartOutcome::Started);

    poll_until(&mut window, |w| !w.is_running());
    let state = window.state();
    assert!(!state.is_running());
    assert_eq!(state.primary_status(), ERROR_STATUS_TEXT);
    assert_eq!(state.gauge(), 0);
    assert_eq!(state.files().len(), 1);
    assert_eq!(window.request_exit(), ExitDecision::Allowed);
    assert_eq!(window.start(), StartOutcome::Started);
}

#[test]
fn test_worker_ending_without_output_is_an_error() {
    setup();
    let factory = ScriptedFactory {
        ends_early: true,
        ..Default::default()
    };
    let mut window = window_with(factory);
    window.start();

    poll_until(&mut window, |w| !w.is_running());
    assert!(!window.is_running());
    assert_eq!(window.state().primary_status(), ERROR_STATUS_TEXT);
}

#[test]
fn test_error_status_resets_progress() {
    setup();
    let mut state = WindowState::default();
    state.update_fields(&["PROGRESS", "Searching faces", "0.8"]);
    state.update_fields(&["STATUS", "Error"]);

    assert!(!state.is_running());
    assert_eq!(state.gauge(), 0);
    assert_eq!(state.primary_status(), ERROR_STATUS_TEXT);
    assert_eq!(state.secondary_status(), "Error");
}

#[test]
fn test_file_status_last_write_wins() {
    setup();
    let mut state = WindowState::default();
    state.update_fields(&["FILEADD", "a.jpg"]);
    state.update_fields(&["FILEDONE", "a.jpg", "1"]);

    assert_eq!(state.files().len(), 1);
    assert_eq!(state.files()[0].name, "a.jpg");
    assert_eq!(state.files()[0].state, FileState::Done);

    state.update_fields(&["FILEDONE", "a.jpg", "0"]);
    assert_eq!(state.files().len(), 1);
    assert_eq!(state.files()[0].state, FileState::Failed);
}

#[test]
fn test_unrecognized_messages_change_nothing() {
    setup();
    let mut state = WindowState::default();
    state.update_fields(&["PROGRESS", "half way", "0.5"]);
    state.update_fields(&["FILEADD", "a.jpg"]);

    state.update_fields(&["UNKNOWN"]);
    state.update_fields(&["UNKNOWN", "x"]);
    state.update_fields::<&str>(&[]);

    assert_eq!(state.gauge(), 50);
    assert_eq!(state.primary_status(), "half way");
    assert_eq!(state.secondary_status(), "");
    assert_eq!(state.files().len(), 1);
    assert_eq!(state.files()[0].state, FileState::Pending);
}

#[test]
fn test_start_while_running_is_rejected() {
    setup();
    let factory = ScriptedFactory::default();
    let created = factory.created.clone();
    let mut window = window_with(factory);

    assert_eq!(window.start(), StartOutcome::Started);
    assert!(window.is_running());

    assert_eq!(window.start(), StartOutcome::AlreadyRunning);
    assert!(window.is_running());
    assert_eq!(created.load(Ordering::SeqCst), 1);

    window.stop();
}

#[test]
fn test_stop_clears_flag_and_reaches_worker() {
    setup();
    let factory = ScriptedFactory::default();
    let stops = factory.stops.clone();
    let mut window = window_with(factory);

    window.start();
    window.stop();
    assert!(!window.is_running());

    wait_for(&stops, 1);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stop_when_idle_is_harmless() {
    setup();
    let mut window = window_with(ScriptedFactory::default());
    window.stop();
    assert!(!window.is_running());
    assert_eq!(window.request_exit(), ExitDecision::Allowed);
}

#[test]
fn test_worker_messages_applied_on_poll() {
    setup();
    let factory = ScriptedFactory {
        script: vec![
            WorkerMessage::FileAdd("a.jpg".into()),
            WorkerMessage::FileAdd("b.jpg".into()),
            WorkerMessage::FileDone { name: "a.jpg".into(), success: true },
            WorkerMessage::FileDone { name: "b.jpg".into(), success: false },
            WorkerMessage::Status("Saving video".into()),
            WorkerMessage::Progress { status: "Finished".into(), fraction: 1.0 },
        ],
        ..Default::default()
    };
    let mut window = window_with(factory);

    window.start();
    poll_until(&mut window, |w| !w.is_running());

    let state = window.state();
    assert!(!state.is_running());
    assert_eq!(state.gauge(), GAUGE_RANGE);
    assert_eq!(state.primary_status(), "Finished");
    assert_eq!(state.secondary_status(), "Saving video");
    let states: Vec<FileState> = state.files().iter().map(|row| row.state).collect();
    assert_eq!(states, vec![FileState::Done, FileState::Failed]);

    // Completed job: a new start is accepted and clears the list
    window.stop();
    assert_eq!(window.start(), StartOutcome::Started);
    assert!(window.state().files().is_empty());
    window.stop();
}

#[test]
fn test_exit_blocked_while_running() {
    setup();
    let mut window = window_with(ScriptedFactory::default());
    window.start();
    assert_eq!(window.request_exit(), ExitDecision::BlockedWhileRunning);

    window.stop();
    assert_eq!(window.request_exit(), ExitDecision::Allowed);
}

#[test]
fn test_job_snapshots_parameters() {
    setup();
    let factory = ScriptedFactory::default();
    let jobs = factory.jobs.clone();
    let mut window = window_with(factory);

    window.choose_input_folder(Some("/data/selfies".into()));
    assert!(!window.choose_input_folder(None));
    window.params_mut().set_speed(2);
    window.start();
    window.params_mut().set_speed(0);
    window.stop();

    let jobs = jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].input_folder, Path::new("/data/selfies"));
    assert_eq!(jobs[0].speed, 2);
}
