//! # Job Parameters
//!
//! The parameter store holds everything the user can choose before starting a
//! job: where the photos are, where the video goes, how photos are framed and
//! ordered, how fast the video plays and which body part the processor tracks.
//!
//! At start time the store is snapshotted into an immutable [`JobDescriptor`]
//! which is handed to the worker and never touched by the window again.

use crate::constants::{
    DEFAULT_FACE_PROFILE, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SPEED, SPEED_CHOICES,
};
use crate::logger::log;
use crate::resources::{resource_path, ResourceKind};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// How photos are framed in the output video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Crop every photo around the detected face
    #[default]
    Crop,
    /// Keep whole photos, padding them to a common frame
    Conservative,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Crop => "crop",
            CropMode::Conservative => "conservative",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How photos are put in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Alphabetical file name order
    #[default]
    Name,
    /// Capture date read from EXIF metadata
    Exif,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::Exif => "exif",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen job settings, mutated by the window controls
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    input_folder: PathBuf,
    output_folder: PathBuf,
    mode: CropMode,
    sort: SortMode,
    speed: u32,
    face_profile: String,
    root_folder: PathBuf,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::with_home(&dirs::home_dir().unwrap_or_default())
    }
}

impl Parameters {
    /// Hard-coded defaults relative to the given home directory
    pub fn with_home(home: &Path) -> Self {
        Self {
            input_folder: home.join(DEFAULT_INPUT_DIR),
            output_folder: home.join(DEFAULT_OUTPUT_DIR),
            mode: CropMode::default(),
            sort: SortMode::default(),
            speed: DEFAULT_SPEED,
            face_profile: DEFAULT_FACE_PROFILE.to_string(),
            root_folder: PathBuf::new(),
        }
    }

    pub fn input_folder(&self) -> &Path {
        &self.input_folder
    }

    pub fn set_input_folder(&mut self, folder: impl Into<PathBuf>) {
        self.input_folder = folder.into();
        log::debug!("Input folder set to {}", self.input_folder.display());
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn set_output_folder(&mut self, folder: impl Into<PathBuf>) {
        self.output_folder = folder.into();
        log::debug!("Output folder set to {}", self.output_folder.display());
    }

    /// The framing choice currently active; exactly one is always selected
    pub fn current_mode(&self) -> CropMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CropMode) {
        self.mode = mode;
    }

    /// The ordering choice currently active; exactly one is always selected
    pub fn current_sort(&self) -> SortMode {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Set the speed index, clamped to the available choices
    pub fn set_speed(&mut self, speed: u32) {
        let max = SPEED_CHOICES.len() as u32 - 1;
        if speed > max {
            log::warn!("Speed {} out of range, using {}", speed, max);
        }
        self.speed = speed.min(max);
    }

    /// Human-readable name of the current speed
    pub fn speed_label(&self) -> &'static str {
        SPEED_CHOICES[self.speed as usize]
    }

    pub fn face_profile(&self) -> &str {
        &self.face_profile
    }

    pub fn set_face_profile(&mut self, profile: impl Into<String>) {
        self.face_profile = profile.into();
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn set_root_folder(&mut self, folder: impl Into<PathBuf>) {
        self.root_folder = folder.into();
    }

    /// Snapshot the store into the descriptor handed to the worker.
    ///
    /// The output folder gets a trailing separator and the cascade folder is
    /// resolved under the root folder. Nothing is checked on disk here.
    pub fn to_job(&self) -> JobDescriptor {
        JobDescriptor {
            cascade_folder: resource_path(&self.root_folder, ResourceKind::Haarcascades),
            input_folder: self.input_folder.clone(),
            output_folder: with_trailing_separator(&self.output_folder),
            face_profile: self.face_profile.clone(),
            sort: self.sort,
            mode: self.mode,
            speed: self.speed,
        }
    }

    /// Write the current settings to the log as a framed block
    pub fn log_parameters(&self) {
        log::debug!("#########");
        log::debug!("Settings:");
        log::debug!("input folder :   {}", self.input_folder.display());
        log::debug!("output folder :   {}", self.output_folder.display());
        log::debug!("Face Type :   {}", self.face_profile);
        log::debug!("Speed chosen :   {} ({})", self.speed, self.speed_label());
        log::debug!("Mode chosen :   {}", self.mode);
        log::debug!("Sort method :   {}", self.sort);
        log::debug!("#########");
    }
}

fn with_trailing_separator(folder: &Path) -> PathBuf {
    let mut raw: OsString = folder.as_os_str().to_owned();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR_STR) {
        raw.push(MAIN_SEPARATOR_STR);
    }
    PathBuf::from(raw)
}

/// Immutable job configuration owned by a worker for the duration of its run
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptor {
    pub cascade_folder: PathBuf,
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub face_profile: String,
    pub sort: SortMode,
    pub mode: CropMode,
    pub speed: u32,
}

impl JobDescriptor {
    /// Command-line form understood by the external processor
    pub fn to_args(&self) -> Vec<OsString> {
        vec![
            "--cascade".into(),
            self.cascade_folder.clone().into_os_string(),
            "--input".into(),
            self.input_folder.clone().into_os_string(),
            "--output".into(),
            self.output_folder.clone().into_os_string(),
            "--profile".into(),
            self.face_profile.clone().into(),
            "--sort".into(),
            self.sort.as_str().into(),
            "--mode".into(),
            self.mode.as_str().into(),
            "--speed".into(),
            self.speed.to_string().into(),
        ]
    }
}
