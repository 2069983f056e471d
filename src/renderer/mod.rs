//! Drawing contract
//!
//! Screens describe a frame as sprite blits and text on a [`Surface`].
//! What a sprite looks like is the backend's business; positions are in
//! screen pixels with the origin at the top-left.

pub mod recording;

use glam::Vec2;

use crate::platform::Key;
use crate::sim::{EntityKind, PlayerAnim, PowerUp};

pub use recording::{DrawCommand, RecordingSurface};

/// RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const GOLD: Color = [1.0, 0.84, 0.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

/// Font sizes used by the screens
pub mod font {
    pub const TEXT: f32 = 24.0;
    /// Inventory count on the HUD power-up badge
    pub const BADGE: f32 = 16.0;
}

/// Full-screen backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Menu,
    Store,
    Play,
    Lose,
}

/// Every image a screen can draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Backdrop(Backdrop),
    /// Ground strip of the play field
    Floor,
    Player { anim: PlayerAnim, frame: usize },
    Entity { kind: EntityKind, frame: usize },
    /// Health bar showing `health` of six segments
    HealthBar(u8),
    CoinIcon,
    KeyCap(Key),
    PowerIcon(PowerUp),
    /// Holder behind a store item's owned count
    Placer,
    /// Holder behind the HUD power-up count
    IconPlacer,
    MenuButton { index: usize, highlighted: bool },
    StoreSlot { power: PowerUp, highlighted: bool },
    BuyButton { highlighted: bool },
}

/// Something frames can be drawn to
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn blit(&mut self, sprite: Sprite, pos: Vec2, flip_x: bool);
    fn text(&mut self, text: &str, size: f32, color: Color, pos: Vec2);
    /// Rendered width of `text`, for right-aligning and centring
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Draw `text` horizontally centred on `center_x`
    fn text_centered(&mut self, text: &str, size: f32, color: Color, center_x: f32, y: f32) {
        let w = self.text_width(text, size);
        self.text(text, size, color, Vec2::new(center_x - w / 2.0, y));
    }
}
