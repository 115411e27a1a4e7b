//! Neon Arcade - two small canvas arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, input, collisions, game phases)
//! - `renderer`: 2D draw lists and the WebGPU pipeline that presents them
//! - `settings`: User preferences (quality, audio, auto-fire)
//! - `demo`: Scripted players for headless runs
//! - `platform`: Browser glue (DOM, input listeners) - wasm only
//! - `audio`: Synthesized sound effects - wasm only

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod demo;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size in pixels (both games)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Fixed simulation timestep. One step is one frame of gameplay.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Split a `0xRRGGBB` color into normalized channels
#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// HUD readout for a score, shown live and on the game-over screen
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00ffff), [0.0, 1.0, 1.0]);
        let [r, g, b] = hex_to_rgb(0x1a1a2e);
        assert!((r - 26.0 / 255.0).abs() < 1e-6);
        assert!((g - 26.0 / 255.0).abs() < 1e-6);
        assert!((b - 46.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(0), "Score: 0");
        assert_eq!(score_text(300), "Score: 300");
    }
}
