//! # Ivolution - Timelapse Videos of Faces
//!
//! Desktop front-end for Ivolution: pick a folder of photos, choose how they are
//! framed and ordered, and let a background processor turn them into a video of
//! you over time while the window shows which photos were handled.
//!
//! ## Application Architecture
//!
//! ```text
//! ┌─────────────────┐   JobDescriptor   ┌─────────────────┐
//! │   GUI Module    │ ────────────────► │  Worker Module  │
//! │                 │                   │                 │
//! │ • Main Window   │ ◄── progress ──── │ • Own thread    │
//! │ • Dialogs       │ ──── STOP ──────► │ • Processor I/O │
//! └─────────────────┘                   └─────────────────┘
//!          │                                     │
//!          └────────────────┬────────────────────┘
//!                  ┌─────────────────┐
//!                  │ Logger Module   │
//!                  │ ~/.ivolution/   │
//!                  └─────────────────┘
//! ```
//!
//! ## Technical Stack
//!
//! - **GUI Framework**: egui / eframe (immediate mode GUI)
//! - **Messaging**: crossbeam channels between the window and the worker thread
//! - **Configuration**: TOML with serde serialization
//! - **Logging**: tracing ecosystem, session log file in the home directory

pub mod config;
pub mod constants;
pub mod gui;
pub mod logger;
pub mod notifier;
pub mod params;
pub mod resources;
pub mod worker;
