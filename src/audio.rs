//! Audio cues
//!
//! Screens never play sound themselves; they push [`AudioCue`]s which the
//! session manager hands to an [`AudioSink`] once per frame.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Hazard contact
    Damage,
    /// Coin picked up
    Collect,
    /// Health ran out
    Death,
    /// Power-up activated
    PowerUp,
    /// Menu/store/lose selection confirmed
    MenuConfirm,
    /// Menu or power-up selector moved
    MenuMove,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Damage => "damage",
            SoundEffect::Collect => "collect",
            SoundEffect::Death => "death",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::MenuConfirm => "menu_confirm",
            SoundEffect::MenuMove => "menu_move",
        }
    }
}

/// Background music, one per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Store,
    Gameplay,
    Defeat,
}

impl MusicTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Store => "store",
            MusicTrack::Gameplay => "gameplay",
            MusicTrack::Defeat => "defeat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Sound(SoundEffect),
    /// Replace whatever music is playing
    Music { track: MusicTrack, looping: bool },
    StopMusic,
}

/// Something that can turn cues into sound
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Headless sink: logs cues at the volume they would play at
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current: Option<MusicTrack>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl LogAudio {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            current: None,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Track currently playing, if any
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Sound(effect) => {
                let vol = self.sfx_level();
                if vol > 0.0 {
                    log::debug!("sfx {} @ {:.2}", effect.as_str(), vol);
                }
            }
            AudioCue::Music { track, looping } => {
                self.current = Some(track);
                log::info!(
                    "music {} @ {:.2}{}",
                    track.as_str(),
                    self.music_level(),
                    if looping { " (loop)" } else { "" }
                );
            }
            AudioCue::StopMusic => {
                if let Some(track) = self.current.take() {
                    log::info!("music {} stopped", track.as_str());
                }
            }
        }
    }
}
