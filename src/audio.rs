//! Audio interface
//!
//! The simulation never plays sounds itself; it reports `GameEvent::Sound`
//! and the driver forwards them to an [`Audio`] backend.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{DEFAULT_MUSIC_VOLUME, DEFAULT_SFX_VOLUME};
use crate::sim::{GameEvent, SoundSet};

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Start looping from the beginning
    Play,
    Pause,
    Resume,
}

/// Sound output used by the driver
pub trait Audio {
    /// Play one variant of `set`, chosen at random
    fn play_random(&mut self, set: SoundSet);

    fn music(&mut self, command: MusicCommand);

    /// Forward every sound request in `events`
    fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(set) = event {
                self.play_random(*set);
            }
        }
    }
}

/// Effect and music volume, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volume {
    pub sfx: f32,
    pub music: f32,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            sfx: DEFAULT_SFX_VOLUME,
            music: DEFAULT_MUSIC_VOLUME,
        }
    }
}

impl Volume {
    /// Step the mute toggle: music off, then effects off, then both back on.
    ///
    /// Returns the music command the backend should apply, if any.
    pub fn cycle_mute(&mut self) -> Option<MusicCommand> {
        if self.music > 0.0 {
            self.music = 0.0;
            Some(MusicCommand::Pause)
        } else if self.sfx > 0.0 {
            self.sfx = 0.0;
            None
        } else {
            *self = Self::default();
            Some(MusicCommand::Resume)
        }
    }

    pub fn sfx_muted(&self) -> bool {
        self.sfx <= 0.0
    }
}

/// Headless backend: picks variants like a real mixer would and logs them
#[derive(Debug)]
pub struct LogAudio {
    rng: Pcg32,
    pub volume: Volume,
    variants: [usize; 4],
    played: Vec<(SoundSet, usize)>,
    music_playing: bool,
}

impl LogAudio {
    /// Three variants per hit/shoot set and a single pickup sound
    pub const DEFAULT_VARIANTS: [usize; 4] = [3, 3, 3, 1];

    pub fn new(seed: u64) -> Self {
        Self::with_variants(seed, Self::DEFAULT_VARIANTS)
    }

    /// `variants` is indexed in `SoundSet` declaration order
    pub fn with_variants(seed: u64, variants: [usize; 4]) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            volume: Volume::default(),
            variants,
            played: Vec::new(),
            music_playing: false,
        }
    }

    /// Every sound played so far, with the variant index chosen
    pub fn played(&self) -> &[(SoundSet, usize)] {
        &self.played
    }

    pub fn count(&self, set: SoundSet) -> usize {
        self.played.iter().filter(|(played, _)| *played == set).count()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Apply the mute toggle and whatever music change it implies
    pub fn toggle_mute(&mut self) {
        if let Some(command) = self.volume.cycle_mute() {
            self.music(command);
        }
        log::debug!(
            "Volume sfx {:.2}, music {:.2}",
            self.volume.sfx,
            self.volume.music
        );
    }

    fn variant_count(&self, set: SoundSet) -> usize {
        let index = match set {
            SoundSet::BallHit => 0,
            SoundSet::ShootHit => 1,
            SoundSet::Shoot => 2,
            SoundSet::Powerup => 3,
        };
        self.variants[index]
    }
}

impl Audio for LogAudio {
    fn play_random(&mut self, set: SoundSet) {
        let count = self.variant_count(set);
        if count == 0 || self.volume.sfx_muted() {
            return;
        }

        let variant = self.rng.random_range(0..count);
        log::debug!("Sound {set:?} #{}", variant + 1);
        self.played.push((set, variant));
    }

    fn music(&mut self, command: MusicCommand) {
        log::debug!("Music {command:?}");
        self.music_playing = match command {
            MusicCommand::Play | MusicCommand::Resume => true,
            MusicCommand::Pause => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mute_cycle() {
        let mut volume = Volume::default();

        assert_eq!(volume.cycle_mute(), Some(MusicCommand::Pause));
        assert_eq!(volume.music, 0.0);
        assert_eq!(volume.sfx, DEFAULT_SFX_VOLUME);

        assert_eq!(volume.cycle_mute(), None);
        assert!(volume.sfx_muted());

        assert_eq!(volume.cycle_mute(), Some(MusicCommand::Resume));
        assert_eq!(volume, Volume::default());
    }

    #[test]
    fn test_muted_effects_are_not_played() {
        let mut audio = LogAudio::new(1);
        audio.toggle_mute();
        audio.play_random(SoundSet::BallHit);
        assert_eq!(audio.played().len(), 1);

        audio.toggle_mute();
        audio.play_random(SoundSet::BallHit);
        assert_eq!(audio.played().len(), 1);
    }

    #[test]
    fn test_toggle_mute_drives_music() {
        let mut audio = LogAudio::new(1);
        audio.music(MusicCommand::Play);
        assert!(audio.music_playing());

        audio.toggle_mute();
        assert!(!audio.music_playing());
        audio.toggle_mute();
        audio.toggle_mute();
        assert!(audio.music_playing());
    }

    #[test]
    fn test_play_events_forwards_sounds_only() {
        let mut audio = LogAudio::new(5);
        let events = [
            GameEvent::BallLaunched,
            GameEvent::Sound(SoundSet::Shoot),
            GameEvent::LifeLost { lives_left: 1 },
            GameEvent::Sound(SoundSet::Powerup),
        ];

        audio.play_events(&events);

        assert_eq!(audio.count(SoundSet::Shoot), 1);
        assert_eq!(audio.played()[1], (SoundSet::Powerup, 0));
    }

    #[test]
    fn test_empty_set_is_silent() {
        let mut audio = LogAudio::with_variants(2, [0, 1, 1, 1]);
        audio.play_random(SoundSet::BallHit);
        assert!(audio.played().is_empty());
    }

    proptest! {
        #[test]
        fn prop_variant_in_range(seed: u64, count in 1usize..10, plays in 1usize..50) {
            let mut audio = LogAudio::with_variants(seed, [count; 4]);
            for _ in 0..plays {
                audio.play_random(SoundSet::ShootHit);
            }
            prop_assert_eq!(audio.played().len(), plays);
            prop_assert!(audio.played().iter().all(|(_, v)| *v < count));
        }
    }
}
