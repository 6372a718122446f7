//! # Ivolution GUI Application Module
//!
//! The egui front-end of the main window. Immediate mode: every frame the whole
//! UI is rebuilt from the [`MainWindow`] controller, and clicks are forwarded to
//! it. Worker messages are drained at the top of each frame, and while a job is
//! running a repaint is scheduled so progress keeps flowing without user input.
//!
//! ## Layout
//!
//! - **Menu bar**: File (Settings, About, Exit) and Help
//! - **Central panel**: input folder, framing and ordering choices, start/stop,
//!   progress gauge and the file list
//! - **Status bar**: main status text and the worker's last status message
//!
//! In minimal mode only the menu bar with About and Exit is shown.

use crate::config::IvolutionConfig;
use crate::constants::{APP_NAME, HELP_URL};
use crate::gui::controller::{ExitDecision, FileState, MainWindow, StartOutcome, WindowFeatures};
use crate::gui::dialogs;
use crate::logger::log;
use crate::params::{CropMode, Parameters, SortMode};
use crate::worker::CommandWorkerFactory;
use eframe::egui;
use egui::{Button, CentralPanel, Color32, ProgressBar, RichText, ScrollArea, TopBottomPanel, ViewportCommand};
use std::time::Duration;

/// Main Ivolution App state
pub struct IvolutionApp {
    /// Job parameters, worker relay and visible job state
    window: MainWindow,

    /// Drain interval while a job is running
    poll_interval: Duration,

    show_about: bool,
    show_settings: bool,

    /// Set when an exit was refused because a job is running
    show_exit_warning: bool,
}

impl IvolutionApp {
    /// Build the application from the persisted configuration
    pub fn new(_cc: &eframe::CreationContext<'_>, config: IvolutionConfig) -> Self {
        let mut params = Parameters::default();
        params.set_root_folder(config.root_folder.clone());

        let features = WindowFeatures::from(config.window_mode);
        let factory = Box::new(CommandWorkerFactory::from_config(&config));
        log::info!(
            "{} window ready ({:?} mode, processor: {})",
            APP_NAME,
            config.window_mode,
            config.worker_command
        );

        Self {
            window: MainWindow::new(params, features, factory),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            show_about: false,
            show_settings: false,
            show_exit_warning: false,
        }
    }

    fn on_input(&mut self) {
        let choice = rfd::FileDialog::new()
            .set_title("Please choose your input directory")
            .set_directory(self.window.params().input_folder())
            .pick_folder();
        if self.window.choose_input_folder(choice) {
            log::info!("Input folder chosen: {}", self.window.params().input_folder().display());
        }
    }

    fn on_start(&mut self) {
        if self.window.start() == StartOutcome::LaunchFailed {
            log::warn!("Job did not start");
        }
    }

    fn on_help(&self) {
        if let Err(e) = webbrowser::open(HELP_URL) {
            log::error!("Failed to open help page: {}", e);
        }
    }

    fn on_exit(&mut self, ctx: &egui::Context) {
        match self.window.request_exit() {
            ExitDecision::Allowed => ctx.send_viewport_cmd(ViewportCommand::Close),
            ExitDecision::BlockedWhileRunning => self.show_exit_warning = true,
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, features: WindowFeatures) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if features.settings && ui.button("Settings").clicked() {
                        self.show_settings = true;
                        ui.close();
                    }
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ui.close();
                        self.on_exit(ctx);
                    }
                });
                if features.help {
                    ui.menu_button("Help", |ui| {
                        if ui.button("Online help").clicked() {
                            ui.close();
                            self.on_help();
                        }
                    });
                }
            });
        });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        let state = self.window.state();
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(state.primary_status());
                ui.separator();
                ui.label(RichText::new(state.secondary_status()).weak());
            });
        });
    }

    fn job_panel(&mut self, ctx: &egui::Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Input folder:");
                    ui.monospace(self.window.params().input_folder().display().to_string());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Choose...").clicked() {
                            self.on_input();
                        }
                    });
                });
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                let mut mode = self.window.params().current_mode();
                ui.horizontal(|ui| {
                    ui.label("Mode:");
                    ui.radio_value(&mut mode, CropMode::Crop, "Crop")
                        .on_hover_text("Crop every photo around the face");
                    ui.radio_value(&mut mode, CropMode::Conservative, "Conservative")
                        .on_hover_text("Keep whole photos");
                });
                self.window.params_mut().set_mode(mode);

                let mut sort = self.window.params().current_sort();
                ui.horizontal(|ui| {
                    ui.label("Sort by:");
                    ui.radio_value(&mut sort, SortMode::Name, "File name");
                    ui.radio_value(&mut sort, SortMode::Exif, "EXIF date");
                });
                self.window.params_mut().set_sort(sort);
            });

            ui.add_space(10.0);

            let running = self.window.is_running();
            ui.horizontal(|ui| {
                if ui.add_enabled(!running, Button::new("▶ Start")).clicked() {
                    self.on_start();
                }
                if ui.add_enabled(running, Button::new("■ Stop")).clicked() {
                    self.window.stop();
                }
            });

            ui.add_space(10.0);
            ui.add(ProgressBar::new(self.window.state().progress()).show_percentage());
            ui.add_space(10.0);

            ui.label(RichText::new("Files").strong());
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                for row in self.window.state().files() {
                    match row.state {
                        FileState::Pending => ui.label(&row.name),
                        FileState::Done => ui.colored_label(Color32::GREEN, &row.name),
                        FileState::Failed => ui.colored_label(Color32::RED, &row.name),
                    };
                }
            });
        });
    }
}

impl eframe::App for IvolutionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.window.poll();
        if self.window.is_running() {
            ctx.request_repaint_after(self.poll_interval);
        }

        // Closing the window goes through the same check as File > Exit
        if ctx.input(|i| i.viewport().close_requested())
            && self.window.request_exit() == ExitDecision::BlockedWhileRunning
        {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            self.show_exit_warning = true;
        }

        let features = self.window.features();
        self.menu_bar(ctx, features);

        if features.job_controls {
            self.status_bar(ctx);
            self.job_panel(ctx);
        } else {
            CentralPanel::default().show(ctx, |_ui| {});
        }

        dialogs::show_about(ctx, &mut self.show_about);
        if features.settings {
            dialogs::show_settings(ctx, &mut self.show_settings, &mut self.window);
        }
        if self.show_exit_warning && dialogs::show_exit_warning(ctx) {
            self.show_exit_warning = false;
        }
    }
}
