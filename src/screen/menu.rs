//! Main menu: Play / Store / Quit

use glam::Vec2;

use super::{ScreenContext, Transition};
use crate::audio::{AudioCue, SoundEffect};
use crate::platform::{Key, KeyAction, KeyEvent};
use crate::renderer::{BLACK, Backdrop, Sprite, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Store,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Store, MenuItem::Quit];

    /// Button position on the menu backdrop
    fn button_pos(&self) -> Vec2 {
        match self {
            MenuItem::Play => Vec2::new(467.0, 417.0),
            MenuItem::Store => Vec2::new(452.0, 499.0),
            MenuItem::Quit => Vec2::new(466.0, 576.0),
        }
    }
}

#[derive(Debug, Default)]
pub struct MainMenu {
    selected: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Transition {
        if key.action != KeyAction::Pressed {
            return Transition::None;
        }
        let len = MenuItem::ALL.len();
        match key.key {
            Key::Down => {
                self.selected = (self.selected + 1) % len;
                ctx.cue(AudioCue::Sound(SoundEffect::MenuMove));
                Transition::None
            }
            Key::Up => {
                self.selected = (self.selected + len - 1) % len;
                ctx.cue(AudioCue::Sound(SoundEffect::MenuMove));
                Transition::None
            }
            Key::Enter => {
                ctx.cue(AudioCue::StopMusic);
                ctx.cue(AudioCue::Sound(SoundEffect::MenuConfirm));
                match self.selected() {
                    MenuItem::Play => Transition::Play,
                    MenuItem::Store => Transition::Store,
                    MenuItem::Quit => Transition::Quit,
                }
            }
            _ => Transition::None,
        }
    }

    pub(super) fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(BLACK);
        surface.blit(Sprite::Backdrop(Backdrop::Menu), Vec2::ZERO, false);
        for (index, item) in MenuItem::ALL.iter().enumerate() {
            let highlighted = index == self.selected;
            surface.blit(
                Sprite::MenuButton { index, highlighted },
                item.button_pos(),
                false,
            );
        }
    }
}
