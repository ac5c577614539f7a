//! Fire-and-forget sound triggers.

use std::io::{stdout, Write};

use crate::entities::SoundCue;

pub trait AudioSink {
    /// Play `cue` without waiting for it. Failures stay inside the sink.
    fn play(&mut self, cue: SoundCue);
}

#[derive(Debug, Default)]
pub struct Mute;

impl AudioSink for Mute {
    fn play(&mut self, cue: SoundCue) {
        tracing::trace!(?cue, "muted");
    }
}

/// Rings the terminal bell on explosions. Shots are too frequent for a bell
/// and stay silent.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        if cue != SoundCue::Explosion {
            return;
        }
        let mut out = stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            tracing::warn!(%err, "terminal bell failed");
        }
    }
}
