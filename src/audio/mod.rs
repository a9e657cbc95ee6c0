//! Sound effects
//!
//! Gameplay only ever asks for a [`Sound`]; how it is produced is up to the
//! [`SoundPlayer`] behind the [`AudioController`]. Playback failures are logged
//! and otherwise ignored, a missing beep never interrupts a game.

use std::io::{self, Write};

use tracing::{debug, warn};

/// Effects the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Eat,
    GameOver,
}

/// Something that can play a [`Sound`]
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound) -> io::Result<()>;
}

/// Plays sounds with the terminal bell: one ring to eat, two on game over
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<io::Stderr> {
    /// Bell on stderr, the stream the terminal UI draws to
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        let rings: &[u8] = match sound {
            Sound::Eat => b"\x07",
            Sound::GameOver => b"\x07\x07",
        };
        self.out.write_all(rings)?;
        self.out.flush()
    }
}

/// A player that never makes a sound
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _sound: Sound) -> io::Result<()> {
        Ok(())
    }
}

/// Routes sound requests to a player, honouring the sound toggle
pub struct AudioController {
    player: Box<dyn SoundPlayer>,
    enabled: bool,
}

impl AudioController {
    pub fn new(player: Box<dyn SoundPlayer>, enabled: bool) -> Self {
        Self { player, enabled }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(Silent), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the toggle and return the new setting
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "Sound toggled");
        self.enabled
    }

    pub fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }

        if let Err(e) = self.player.play(sound) {
            warn!(error = %e, ?sound, "Sound playback failed");
        }
    }
}
