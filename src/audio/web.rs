//! Web Audio playback

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::SoundEffect;

/// Output level for every effect
const VOLUME: f32 = 0.8;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let vol = VOLUME;
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Launch => self.play_launch(ctx, vol),
            SoundEffect::WallBounce => self.play_wall_bounce(ctx, vol),
            SoundEffect::Land => self.play_land(ctx, vol),
            SoundEffect::Pop => self.play_pop(ctx, vol),
            SoundEffect::Drop => self.play_drop(ctx, vol),
            SoundEffect::Cleared => self.play_cleared(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Oscillator routed through a gain node to the destination
    fn create_osc(
        &self,
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

    /// Single decaying tone, optionally sweeping to `end_freq`
    #[allow(clippy::too_many_arguments)]
    fn blip(
        &self,
        ctx: &AudioContext,
        vol: f32,
        freq: f32,
        end_freq: Option<f32>,
        osc_type: OscillatorType,
        delay: f64,
        length: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();
        if let Some(end) = end_freq {
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + length)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + length + 0.05).ok();
    }

    /// Launch - whoosh up
    fn play_launch(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, vol * 0.3, 200.0, Some(600.0), OscillatorType::Triangle, 0.0, 0.15);
    }

    fn play_wall_bounce(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, vol * 0.25, 400.0, None, OscillatorType::Sine, 0.0, 0.08);
    }

    /// Land - soft thump
    fn play_land(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, vol * 0.4, 150.0, Some(70.0), OscillatorType::Sine, 0.0, 0.1);
    }

    /// Pop - bright bubbly chirp
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, vol * 0.3, 500.0, Some(1400.0), OscillatorType::Sine, 0.0, 0.08);
        self.blip(ctx, vol * 0.2, 900.0, Some(1800.0), OscillatorType::Triangle, 0.04, 0.08);
    }

    /// Drop - falling whistle
    fn play_drop(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, vol * 0.3, 700.0, Some(120.0), OscillatorType::Triangle, 0.0, 0.35);
    }

    /// Cleared - triumphant fanfare
    fn play_cleared(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            self.blip(ctx, vol * 0.3, *freq, None, OscillatorType::Triangle, i as f64 * 0.1, 0.4);
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            self.blip(ctx, vol * 0.3, *freq, None, OscillatorType::Sine, i as f64 * 0.2, 0.3);
        }
    }
}
