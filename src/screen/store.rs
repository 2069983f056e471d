//! Power-up store
//!
//! A ring of the catalog, three items visible at a time. Moving past either
//! end of the visible window rotates the ring instead of moving the cursor.

use glam::Vec2;

use super::{ScreenContext, Transition};
use crate::audio::{AudioCue, SoundEffect};
use crate::persistence::{self, Progression, ProgressionStore, StoreError};
use crate::platform::{Key, KeyAction, KeyEvent};
use crate::renderer::{BLACK, Backdrop, Sprite, Surface, WHITE, font};
use crate::sim::PowerUp;

const VISIBLE_SLOTS: usize = 3;
const SLOT_X: f32 = 15.0;
const SLOT_Y: [f32; VISIBLE_SLOTS] = [12.0, 216.0, 420.0];
/// Count badge sits this far below its slot
const PLACER_OFFSET_Y: f32 = 130.0;
const PLACER_SIZE: Vec2 = Vec2::new(60.0, 61.0);
const BUY_BUTTON_X: f32 = 469.0;
const BUY_BUTTON_Y: [f32; VISIBLE_SLOTS] = [41.0, 245.0, 449.0];
const COINS_POS: Vec2 = Vec2::new(57.0, 657.0);

#[derive(Debug)]
pub struct StoreScreen {
    /// Catalog in display order; the first three are visible
    ring: Vec<PowerUp>,
    /// Highlighted visible slot
    slot: usize,
    progression: Progression,
}

impl StoreScreen {
    pub fn open(store: &dyn ProgressionStore) -> Result<Self, StoreError> {
        let progression = Progression::load(store)?;
        Ok(Self {
            ring: PowerUp::CATALOG.to_vec(),
            slot: 0,
            progression,
        })
    }

    /// Items currently on screen, top to bottom
    pub fn visible(&self) -> &[PowerUp] {
        &self.ring[..VISIBLE_SLOTS]
    }

    pub fn selected(&self) -> PowerUp {
        self.ring[self.slot]
    }

    pub fn coins(&self) -> u64 {
        self.progression.coins
    }

    pub fn owned(&self, power: PowerUp) -> u64 {
        self.progression.inventory.count(power)
    }

    pub(super) fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &mut ScreenContext,
    ) -> Result<Transition, StoreError> {
        match (key.action, key.key) {
            (KeyAction::Pressed, Key::Down) => {
                ctx.cue(AudioCue::Sound(SoundEffect::MenuMove));
                if self.slot + 1 == VISIBLE_SLOTS {
                    self.ring.rotate_left(1);
                } else {
                    self.slot += 1;
                }
            }
            (KeyAction::Pressed, Key::Up) => {
                ctx.cue(AudioCue::Sound(SoundEffect::MenuMove));
                if self.slot == 0 {
                    self.ring.rotate_right(1);
                } else {
                    self.slot -= 1;
                }
            }
            (KeyAction::Pressed, Key::Enter) => {
                ctx.cue(AudioCue::Sound(SoundEffect::MenuConfirm));
                let power = self.selected();
                if let Some(balance) = persistence::purchase(&mut *ctx.store, power)? {
                    self.progression.coins = balance;
                    *self.progression.inventory.count_mut(power) += 1;
                }
            }
            (KeyAction::Released, Key::E) => {
                ctx.cue(AudioCue::Sound(SoundEffect::MenuConfirm));
                return Ok(Transition::MainMenu);
            }
            _ => {}
        }
        Ok(Transition::None)
    }

    pub(super) fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(BLACK);
        surface.blit(Sprite::Backdrop(Backdrop::Store), Vec2::ZERO, false);
        surface.text(&self.coins().to_string(), font::TEXT, WHITE, COINS_POS);

        for (slot, &power) in self.visible().iter().enumerate() {
            let pos = Vec2::new(SLOT_X, SLOT_Y[slot]);
            surface.blit(
                Sprite::StoreSlot {
                    power,
                    highlighted: slot == self.slot,
                },
                pos,
                false,
            );

            let placer = pos + Vec2::new(0.0, PLACER_OFFSET_Y);
            surface.blit(Sprite::Placer, placer, false);
            let count = self.owned(power).to_string();
            let w = surface.text_width(&count, font::TEXT);
            let inset = Vec2::new(
                (PLACER_SIZE.x - w) / 2.0,
                (PLACER_SIZE.y - font::TEXT) / 2.0,
            );
            surface.text(&count, font::TEXT, WHITE, placer + inset);
        }

        surface.blit(
            Sprite::BuyButton { highlighted: true },
            Vec2::new(BUY_BUTTON_X, BUY_BUTTON_Y[self.slot]),
            false,
        );
    }
}
