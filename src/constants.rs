//! # Application Constants
//!
//! Application-wide names, paths and defaults shared by the window, the logger
//! and the worker so they stay consistent across the application.

/// Application name shown in the title bar and the about box
pub const APP_NAME: &str = "Ivolution";

/// Version reported by the about box
pub const APP_VERSION: &str = "0.6";

/// Online help, opened in the user's browser
pub const HELP_URL: &str = "http://jlengrand.github.com/FaceMovie/";

/// Author website shown in the about box
pub const WEBSITE_URL: &str = "http://www.lengrand.fr";

/// Window icon, inside the bundled media folder
pub const WINDOW_ICON_FILE: &str = "vitruve.ico";

/// Personal directory under the user's home, holds the log file
pub const PERSONAL_DIR_NAME: &str = ".ivolution";

/// Log file name inside the personal directory
pub const LOG_FILE_NAME: &str = "ivolution.log";

/// Separator written once per application start to split sessions in the log
pub const SESSION_SEPARATOR: &str = "######";

/// Full scale of the progress gauge
pub const GAUGE_RANGE: u32 = 100;

/// Video speed choices, indexed by the numeric speed parameter
pub const SPEED_CHOICES: [&str; 3] = ["slow", "medium", "fast"];

/// Default speed index (`medium`)
pub const DEFAULT_SPEED: u32 = 1;

/// Face profiles the processor knows how to look for
pub const FACE_PROFILES: [&str; 4] = ["frontal_face", "profile_face", "upper_body", "full_body"];

/// Default face profile
pub const DEFAULT_FACE_PROFILE: &str = "frontal_face";

/// Default input folder, relative to the home directory
pub const DEFAULT_INPUT_DIR: &str = "Pictures";

/// Default output folder, relative to the home directory
pub const DEFAULT_OUTPUT_DIR: &str = "Videos";

/// Default external processor invoked by the command worker
pub const DEFAULT_WORKER_COMMAND: &str = "facemovie";

/// How often the window drains worker messages while a job runs
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Text shown in the primary status field when the worker reports an error
pub const ERROR_STATUS_TEXT: &str = "Error detected";

/// Warning shown when the user tries to quit during processing
pub const EXIT_BLOCKED_TEXT: &str = "Cannot exit while processing! Please press stop first.";
