//! adgrid core: state and logic for an ad-space grid canvas.
//!
//! A host (desktop webview, CLI, or anything else) owns one `Sys`, binds a
//! grid engine through `Sys::initialize`, sends `Command`s, and applies the
//! `Action`s that come back. The engine itself is a collaborator behind the
//! `GridEngine` trait; `engine::headless` provides one without a renderer.

pub mod command;
pub mod engine;
pub mod error;
pub mod grid;
pub mod help;
pub mod layout;
pub mod response;
pub mod sys;
pub mod types;
