//! Browser glue
//!
//! - `hud`: score text and start/game-over screens
//! - `input`: keyboard, on-screen buttons, joystick and focus listeners

pub mod hud;
pub mod input;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::renderer::RenderError;

/// Failures while wiring the page up
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub fn document() -> Result<Document, PlatformError> {
    window()?.document().ok_or(PlatformError::NoDocument)
}

/// Look up a canvas by id
pub fn canvas(document: &Document, id: &'static str) -> Result<HtmlCanvasElement, PlatformError> {
    document
        .get_element_by_id(id)
        .ok_or(PlatformError::MissingElement(id))?
        .dyn_into()
        .map_err(|_| PlatformError::NotACanvas(id))
}
