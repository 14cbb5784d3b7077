// Beeps through Web Audio. Any failure leaves the game silent, never broken.
use log::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::engine::Tone;

const PEAK_GAIN: f32 = 0.3;
const TAIL_GAIN: f32 = 0.01;

pub struct Audio {
    ctx: AudioContext,
}

impl Audio {
    /// Browsers only allow this after a user gesture; call from tap/start.
    pub fn new() -> Option<Self> {
        match AudioContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(err) => {
                warn!("audio unavailable, continuing without sound: {err:?}");
                None
            }
        }
    }

    pub fn play(&self, tone: Tone) {
        if let Err(err) = self.try_play(tone) {
            debug!("dropped {} Hz tone: {err:?}", tone.frequency_hz);
        }
    }

    fn try_play(&self, tone: Tone) -> Result<(), JsValue> {
        let t = self.ctx.current_time();
        let osc = self.ctx.create_oscillator()?;
        let gain = self.ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value_at_time(tone.frequency_hz, t)?;
        gain.gain().set_value_at_time(PEAK_GAIN, t)?;
        gain.gain().exponential_ramp_to_value_at_time(TAIL_GAIN, t + tone.duration_s)?;

        osc.start_with_when(t)?;
        osc.stop_with_when(t + tone.duration_s)?;
        Ok(())
    }
}

impl Drop for Audio {
    fn drop(&mut self) {
        let _ = self.ctx.close();
    }
}
