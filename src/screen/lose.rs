//! Game over screen

use glam::Vec2;

use super::{ScreenContext, Transition};
use crate::audio::{AudioCue, SoundEffect};
use crate::consts::SCREEN_WIDTH;
use crate::platform::{Key, KeyAction, KeyEvent};
use crate::renderer::{BLACK, Backdrop, Sprite, Surface, WHITE, font};

/// Result of a finished play session, as saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoseSummary {
    pub score: u64,
    /// High score after this session was saved
    pub high_score: u64,
    /// Saved coin total, including `earned_coins`
    pub total_coins: u64,
    pub earned_coins: u64,
}

#[derive(Debug)]
pub struct LoseScreen {
    summary: LoseSummary,
}

impl LoseScreen {
    pub fn new(summary: LoseSummary) -> Self {
        Self { summary }
    }

    pub fn summary(&self) -> &LoseSummary {
        &self.summary
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Transition {
        if key.action != KeyAction::Released {
            return Transition::None;
        }
        let next = match key.key {
            Key::M => Transition::MainMenu,
            Key::S => Transition::Store,
            Key::P => Transition::Play,
            _ => return Transition::None,
        };
        ctx.cue(AudioCue::Sound(SoundEffect::MenuConfirm));
        next
    }

    pub(super) fn draw(&self, surface: &mut dyn Surface) {
        let s = &self.summary;
        let center = SCREEN_WIDTH / 2.0;

        surface.clear(BLACK);
        surface.blit(Sprite::Backdrop(Backdrop::Lose), Vec2::ZERO, false);
        surface.text_centered(&format!("Score: {}", s.score), font::TEXT, WHITE, center, 35.0);
        surface.text_centered(
            &format!("High Score: {}", s.high_score),
            font::TEXT,
            WHITE,
            center,
            67.0,
        );
        surface.text_centered(
            &format!("Coins: {} +{}", s.total_coins, s.earned_coins),
            font::TEXT,
            WHITE,
            center,
            98.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::renderer::{DrawCommand, RecordingSurface};

    fn summary() -> LoseSummary {
        LoseSummary {
            score: 300,
            high_score: 500,
            total_coins: 140,
            earned_coins: 40,
        }
    }

    fn send(screen: &mut LoseScreen, key: KeyEvent) -> Transition {
        let mut store = MemoryStore::new();
        let mut cues = Vec::new();
        let mut ctx = ScreenContext {
            store: &mut store,
            cues: &mut cues,
        };
        screen.handle_key(key, &mut ctx)
    }

    #[test]
    fn test_keys_on_release() {
        let mut screen = LoseScreen::new(summary());
        assert_eq!(send(&mut screen, KeyEvent::pressed(Key::M)), Transition::None);
        assert_eq!(send(&mut screen, KeyEvent::released(Key::M)), Transition::MainMenu);
        assert_eq!(send(&mut screen, KeyEvent::released(Key::S)), Transition::Store);
        assert_eq!(send(&mut screen, KeyEvent::released(Key::P)), Transition::Play);
        assert_eq!(send(&mut screen, KeyEvent::released(Key::Q)), Transition::None);
    }

    #[test]
    fn test_texts_centred() {
        let mut surface = RecordingSurface::new();
        LoseScreen::new(summary()).draw(&mut surface);
        assert_eq!(
            surface.texts(),
            vec!["Score: 300", "High Score: 500", "Coins: 140 +40"]
        );
        // "Score: 300" is 10 glyphs of 12px
        match surface.find_text("Score: 300") {
            Some(DrawCommand::Text { pos, .. }) => assert_eq!(*pos, Vec2::new(480.0, 35.0)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
