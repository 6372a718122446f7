//! Secondary windows: about box, settings and the exit warning.

use crate::constants::{APP_NAME, APP_VERSION, EXIT_BLOCKED_TEXT, FACE_PROFILES, SPEED_CHOICES, WEBSITE_URL};
use crate::gui::controller::MainWindow;
use eframe::egui;
use egui::{Color32, Id, Modal, RichText, ScrollArea, Window};

const DESCRIPTION: &str = "Ivolution is a project aiming at helping you create videos of yourself over time.
Simply take pictures of yourself, Ivolution does everything else for you.

Ivolution may be used for faces, but also profiles (to show women along pregnancy) \
or full body (for people workouting).

The only limitation comes from you !

Please note that Ivolution is distributed in the hope that it will be useful, \
but WITHOUT ANY WARRANTY.";

const COPYRIGHT: &str = "(C) 2012 Julien Lengrand-Lambert";

const LICENCE: &str = "Copyright (c) 2012, Julien Lengrand-Lambert
All rights reserved.

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.
2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS \"AS IS\" AND
ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR CONTRIBUTORS BE LIABLE FOR
ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
(INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND
ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.";

const CREDITS: [(&str, &str); 4] = [
    ("Developer", "Julien Lengrand-Lambert"),
    ("Documentation", "Julien Lengrand-Lambert"),
    ("Artwork", "Luc Viatour"),
    ("Translation", "Julien Lengrand-Lambert"),
];

/// About box with description, credits and licence
pub fn show_about(ctx: &egui::Context, open: &mut bool) {
    Window::new(format!("About {}", APP_NAME))
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(APP_NAME);
                ui.label(RichText::new(APP_VERSION).weak());
            });
            ui.add_space(5.0);
            ui.label(DESCRIPTION);
            ui.add_space(5.0);
            ui.label(COPYRIGHT);
            ui.hyperlink(WEBSITE_URL);

            ui.separator();
            egui::Grid::new("about_credits").num_columns(2).show(ui, |ui| {
                for (role, name) in CREDITS {
                    ui.label(RichText::new(role).strong());
                    ui.label(name);
                    ui.end_row();
                }
            });

            ui.collapsing("Licence", |ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    ui.monospace(LICENCE);
                });
            });
        });
}

/// Settings for the next job: face profile, speed and output folder
pub fn show_settings(ctx: &egui::Context, open: &mut bool, window: &mut MainWindow) {
    Window::new("Settings")
        .open(open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Face type:");
            let mut profile = window.params().face_profile().to_string();
            egui::ComboBox::from_id_salt("face_profile")
                .selected_text(profile.clone())
                .show_ui(ui, |ui| {
                    for candidate in FACE_PROFILES {
                        ui.selectable_value(&mut profile, candidate.to_string(), candidate);
                    }
                });
            if profile != window.params().face_profile() {
                window.params_mut().set_face_profile(profile);
            }

            ui.add_space(10.0);
            ui.label("Video speed:");
            let mut speed = window.params().speed();
            ui.horizontal(|ui| {
                for (index, label) in SPEED_CHOICES.iter().enumerate() {
                    ui.radio_value(&mut speed, index as u32, *label);
                }
            });
            if speed != window.params().speed() {
                window.params_mut().set_speed(speed);
            }

            ui.add_space(10.0);
            ui.label("Output folder:");
            ui.horizontal(|ui| {
                ui.monospace(window.params().output_folder().display().to_string());
                if ui.button("Choose...").clicked() {
                    let choice = rfd::FileDialog::new()
                        .set_title("Please choose your output directory")
                        .set_directory(window.params().output_folder())
                        .pick_folder();
                    window.choose_output_folder(choice);
                }
            });

            if window.is_running() {
                ui.add_space(5.0);
                ui.small(RichText::new("Changes apply to the next job").color(Color32::GRAY));
            }
        });
}

/// Modal shown when the user tries to quit during processing.
///
/// Returns `true` once the user dismissed it.
pub fn show_exit_warning(ctx: &egui::Context) -> bool {
    let mut dismissed = false;
    let response = Modal::new(Id::new("exit_warning")).show(ctx, |ui| {
        ui.heading("Exclamation");
        ui.add_space(5.0);
        ui.label(EXIT_BLOCKED_TEXT);
        ui.add_space(10.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });
    dismissed || response.should_close()
}
