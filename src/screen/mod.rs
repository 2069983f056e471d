//! Screens and the session manager
//!
//! Exactly one screen is active. Screens never replace themselves: key and
//! update handlers return a [`Transition`] and the [`SessionManager`] swaps
//! the active screen.

mod lose;
mod menu;
mod play;
mod store;

use thiserror::Error;

use crate::audio::{AudioCue, AudioSink, MusicTrack};
use crate::persistence::{ProgressionStore, StoreError};
use crate::platform::{InputEvent, KeyEvent};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::LevelError;

pub use lose::{LoseScreen, LoseSummary};
pub use menu::{MainMenu, MenuItem};
pub use play::PlayScreen;
pub use store::StoreScreen;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// What the active screen asks the manager to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    MainMenu,
    Store,
    Play,
    Lose(LoseSummary),
    Quit,
}

/// Services a screen may use while handling input or updating
pub struct ScreenContext<'a> {
    pub store: &'a mut dyn ProgressionStore,
    pub cues: &'a mut Vec<AudioCue>,
}

impl ScreenContext<'_> {
    pub fn cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

/// The active screen
#[derive(Debug)]
pub enum Screen {
    MainMenu(MainMenu),
    Store(StoreScreen),
    Play(Box<PlayScreen>),
    Lose(LoseScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu(_) => "main menu",
            Screen::Store(_) => "store",
            Screen::Play(_) => "play",
            Screen::Lose(_) => "lose",
        }
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &mut ScreenContext,
    ) -> Result<Transition, SessionError> {
        let transition = match self {
            Screen::MainMenu(menu) => menu.handle_key(key, ctx),
            Screen::Store(store) => store.handle_key(key, ctx)?,
            Screen::Play(play) => play.handle_key(key, ctx),
            Screen::Lose(lose) => lose.handle_key(key, ctx),
        };
        Ok(transition)
    }

    fn update(&mut self, ctx: &mut ScreenContext) -> Result<Transition, SessionError> {
        match self {
            Screen::Play(play) => play.update(ctx),
            Screen::MainMenu(_) | Screen::Store(_) | Screen::Lose(_) => Ok(Transition::None),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Screen::MainMenu(menu) => menu.draw(surface),
            Screen::Store(store) => store.draw(surface),
            Screen::Play(play) => play.draw(surface),
            Screen::Lose(lose) => lose.draw(surface),
        }
    }
}

/// Owns the active screen, the progression store and the audio sink
pub struct SessionManager<S: ProgressionStore, A: AudioSink> {
    settings: Settings,
    store: S,
    audio: A,
    screen: Screen,
    running: bool,
    /// Play sessions started; offsets the seed of each new session
    sessions: u64,
    cues: Vec<AudioCue>,
}

impl<S: ProgressionStore, A: AudioSink> SessionManager<S, A> {
    /// Start at the main menu
    pub fn new(settings: Settings, store: S, audio: A) -> Self {
        let mut manager = Self {
            settings,
            store,
            audio,
            screen: Screen::MainMenu(MainMenu::new()),
            running: true,
            sessions: 0,
            cues: vec![AudioCue::Music {
                track: MusicTrack::Menu,
                looping: true,
            }],
        };
        manager.flush_audio();
        log::info!("Session started at the main menu");
        manager
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Feed one platform event to the active screen
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), SessionError> {
        if !self.running {
            return Ok(());
        }
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested on the {} screen", self.screen.name());
                self.save_all()?;
                self.running = false;
            }
            InputEvent::Key(key) => {
                let mut ctx = ScreenContext {
                    store: &mut self.store,
                    cues: &mut self.cues,
                };
                let transition = self.screen.handle_key(key, &mut ctx)?;
                self.apply(transition)?;
            }
        }
        self.flush_audio();
        Ok(())
    }

    /// Advance the active screen by one frame
    pub fn update(&mut self) -> Result<(), SessionError> {
        if !self.running {
            return Ok(());
        }
        let mut ctx = ScreenContext {
            store: &mut self.store,
            cues: &mut self.cues,
        };
        let transition = self.screen.update(&mut ctx)?;
        self.apply(transition)?;
        self.flush_audio();
        Ok(())
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.screen.draw(surface);
    }

    /// Persist an in-progress play session. Other screens have nothing
    /// unsaved.
    pub fn save_all(&mut self) -> Result<(), SessionError> {
        if let Screen::Play(play) = &mut self.screen {
            play.commit(&mut self.store)?;
        }
        Ok(())
    }

    fn apply(&mut self, transition: Transition) -> Result<(), SessionError> {
        let next = match transition {
            Transition::None => return Ok(()),
            Transition::Quit => {
                self.cues.push(AudioCue::StopMusic);
                self.save_all()?;
                self.running = false;
                log::info!("Quit from the {} screen", self.screen.name());
                return Ok(());
            }
            Transition::MainMenu => {
                self.music(MusicTrack::Menu, true);
                Screen::MainMenu(MainMenu::new())
            }
            Transition::Store => {
                self.music(MusicTrack::Store, true);
                Screen::Store(StoreScreen::open(&self.store)?)
            }
            Transition::Play => {
                let seed = self.settings.seed.wrapping_add(self.sessions);
                self.sessions += 1;
                let config = self.settings.play_config(seed);
                let play = PlayScreen::start(config, &self.store)?;
                self.music(MusicTrack::Gameplay, true);
                Screen::Play(Box::new(play))
            }
            Transition::Lose(summary) => Screen::Lose(LoseScreen::new(summary)),
        };
        log::info!("Screen: {} -> {}", self.screen.name(), next.name());
        self.screen = next;
        Ok(())
    }

    fn music(&mut self, track: MusicTrack, looping: bool) {
        self.cues.push(AudioCue::Music { track, looping });
    }

    fn flush_audio(&mut self) {
        for cue in self.cues.drain(..) {
            self.audio.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::persistence::{MemoryStore, ProgressKey};
    use crate::platform::Key;
    use crate::renderer::RecordingSurface;

    /// Sink that remembers every cue
    #[derive(Default)]
    struct CueLog(Vec<AudioCue>);

    impl AudioSink for CueLog {
        fn play(&mut self, cue: AudioCue) {
            self.0.push(cue);
        }
    }

    fn manager(store: MemoryStore) -> SessionManager<MemoryStore, CueLog> {
        SessionManager::new(Settings::default(), store, CueLog::default())
    }

    fn press(manager: &mut SessionManager<MemoryStore, CueLog>, key: Key) {
        manager
            .handle_event(InputEvent::Key(KeyEvent::pressed(key)))
            .unwrap();
    }

    fn release(manager: &mut SessionManager<MemoryStore, CueLog>, key: Key) {
        manager
            .handle_event(InputEvent::Key(KeyEvent::released(key)))
            .unwrap();
    }

    #[test]
    fn test_starts_at_menu_with_music() {
        let m = manager(MemoryStore::new());
        assert!(matches!(m.screen(), Screen::MainMenu(_)));
        assert_eq!(
            m.audio().0,
            vec![AudioCue::Music {
                track: MusicTrack::Menu,
                looping: true
            }]
        );
    }

    #[test]
    fn test_menu_enter_starts_play() {
        let mut m = manager(MemoryStore::new());
        press(&mut m, Key::Enter);
        assert!(matches!(m.screen(), Screen::Play(_)));
        assert!(m.audio().0.contains(&AudioCue::Music {
            track: MusicTrack::Gameplay,
            looping: true
        }));
    }

    #[test]
    fn test_menu_to_store_and_back() {
        let mut m = manager(MemoryStore::new());
        press(&mut m, Key::Down);
        press(&mut m, Key::Enter);
        assert!(matches!(m.screen(), Screen::Store(_)));
        release(&mut m, Key::E);
        assert!(matches!(m.screen(), Screen::MainMenu(_)));
    }

    #[test]
    fn test_menu_quit_item_stops_running() {
        let mut m = manager(MemoryStore::new());
        press(&mut m, Key::Up);
        press(&mut m, Key::Enter);
        assert!(!m.is_running());
        assert!(m.audio().0.contains(&AudioCue::StopMusic));
    }

    #[test]
    fn test_quit_during_play_persists_session() {
        let store = MemoryStore::new()
            .with(ProgressKey::Coins, 100)
            .with(ProgressKey::DoubleCoins, 1);
        let mut m = manager(store);
        press(&mut m, Key::Enter);
        match &mut m.screen {
            Screen::Play(play) => {
                play.state_mut().player.coins = 30;
                play.state_mut().player.score = 200;
            }
            other => panic!("expected play, got {}", other.name()),
        }
        // Spend the 2x charge
        press(&mut m, Key::Enter);

        m.handle_event(InputEvent::Quit).unwrap();
        assert!(!m.is_running());
        assert_eq!(m.store().read(ProgressKey::Coins).unwrap(), 130);
        assert_eq!(m.store().read(ProgressKey::HighScore).unwrap(), 200);
        assert_eq!(m.store().read(ProgressKey::DoubleCoins).unwrap(), 0);

        // Nothing happens once stopped
        m.handle_event(InputEvent::Quit).unwrap();
        assert_eq!(m.store().read(ProgressKey::Coins).unwrap(), 130);
    }

    #[test]
    fn test_quit_from_menu_leaves_store_untouched() {
        let mut m = manager(MemoryStore::new().with(ProgressKey::Coins, 7));
        m.handle_event(InputEvent::Quit).unwrap();
        assert_eq!(m.store().read(ProgressKey::Coins).unwrap(), 7);
    }

    #[test]
    fn test_death_goes_to_lose_and_persists() {
        let mut m = manager(MemoryStore::new().with(ProgressKey::HighScore, 50));
        press(&mut m, Key::Enter);
        match &mut m.screen {
            Screen::Play(play) => {
                let state = play.state_mut();
                state.level.clear();
                state.player.health = 1;
                state.player.coins = 40;
                state.player.score = 300;
            }
            other => panic!("expected play, got {}", other.name()),
        }
        m.update().unwrap();

        let Screen::Lose(lose) = m.screen() else {
            panic!("expected lose, got {}", m.screen().name());
        };
        assert_eq!(
            *lose.summary(),
            LoseSummary {
                score: 300,
                high_score: 300,
                total_coins: 40,
                earned_coins: 40,
            }
        );
        assert_eq!(m.store().read(ProgressKey::Coins).unwrap(), 40);
        assert_eq!(m.store().read(ProgressKey::HighScore).unwrap(), 300);
        let cues = &m.audio().0;
        assert!(cues.contains(&AudioCue::Sound(SoundEffect::Death)));
        assert!(cues.contains(&AudioCue::Music {
            track: MusicTrack::Defeat,
            looping: false
        }));

        // P replays, committing nothing twice
        release(&mut m, Key::P);
        assert!(matches!(m.screen(), Screen::Play(_)));
        m.handle_event(InputEvent::Quit).unwrap();
        assert_eq!(m.store().read(ProgressKey::Coins).unwrap(), 40);
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let mut m = manager(MemoryStore::new());
        press(&mut m, Key::Enter);
        let Screen::Play(first) = m.screen() else {
            panic!("expected play");
        };
        let first_seed = first.state().seed;
        m.save_all().unwrap();
        m.apply(Transition::Play).unwrap();
        let Screen::Play(second) = m.screen() else {
            panic!("expected play");
        };
        assert_ne!(first_seed, second.state().seed);
    }

    #[test]
    fn test_draw_each_screen() {
        let mut m = manager(MemoryStore::new());
        let mut surface = RecordingSurface::new();
        m.draw(&mut surface);
        assert!(!surface.commands().is_empty());
        press(&mut m, Key::Enter);
        m.update().unwrap();
        m.draw(&mut surface);
        assert!(surface.find_text("0").is_some());
    }
}
