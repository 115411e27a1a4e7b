//! Score readout and overlay screens

use web_sys::{Document, Element};

use crate::score_text;

const HIDDEN: &str = "hidden";

/// Handles to the HUD elements; any of them may be absent
pub struct Hud {
    score: Option<Element>,
    final_score: Option<Element>,
    start_screen: Option<Element>,
    game_over_screen: Option<Element>,
}

impl Hud {
    pub fn new(document: &Document) -> Self {
        Self {
            score: document.get_element_by_id("score"),
            final_score: document.get_element_by_id("final-score"),
            start_screen: document.get_element_by_id("start-screen"),
            game_over_screen: document.get_element_by_id("game-over-screen"),
        }
    }

    pub fn set_score(&self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score_text(score)));
        }
    }

    /// Hide both overlays when a run starts
    pub fn hide_screens(&self) {
        for el in [&self.start_screen, &self.game_over_screen].into_iter().flatten() {
            let _ = el.class_list().add_1(HIDDEN);
        }
    }

    pub fn show_game_over(&self, score: u64) {
        if let Some(el) = &self.final_score {
            el.set_text_content(Some(&score_text(score)));
        }
        if let Some(el) = &self.game_over_screen {
            let _ = el.class_list().remove_1(HIDDEN);
        }
    }
}
