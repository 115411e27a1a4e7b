//! Audio system using Web Audio API
//!
//! Two synthesized tones, no external files.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Short rising blip (shot, jump)
    Blip,
    /// Low sawtooth drop (explosion, crash)
    Boom,
}

impl SoundEffect {
    /// Effect for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired | GameEvent::Jumped => Some(SoundEffect::Blip),
            GameEvent::EnemyDestroyed { .. } | GameEvent::GameOver { .. } => {
                Some(SoundEffect::Boom)
            }
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Play the sound for each event that has one
    pub fn play_events<'a>(&self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for effect in events.into_iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers start contexts suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Blip => play_blip(ctx, vol),
            SoundEffect::Boom => play_boom(ctx, vol),
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

fn play_blip(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 440.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.15, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
        .ok();
    osc.frequency().set_value_at_time(440.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(880.0, t + 0.1)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.1).ok();
}

fn play_boom(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.4, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
        .ok();
    osc.frequency().set_value_at_time(100.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(30.0, t + 0.3)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.3).ok();
}
