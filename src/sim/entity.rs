//! Level entities: hazards, coins and static geometry
//!
//! Every entity shares one shape (position, animation frame, frame timer) and
//! dispatches on [`EntityKind`] for movement speed, frame cadence, sprite
//! footprint and what happens when the player touches it. Pits carry an
//! extra visibility cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Ticks per pit frame while visible
pub const PIT_TICKS_PER_FRAME: u32 = 2;
/// Frames in the pit strip (8 opening + 8 closing)
pub const PIT_FRAMES: usize = 16;
/// Ticks a pit stays hidden after finishing its strip
pub const PIT_HIDDEN_TICKS: u32 = 40;
/// Frame a pit resumes from after being hidden (first closing frame)
pub const PIT_RESUME_FRAME: usize = 8;
/// Pit sprite widths for the opening half; the closing half mirrors them
const PIT_WIDTHS: [f32; 8] = [160.0, 140.0, 120.0, 100.0, 80.0, 60.0, 40.0, 20.0];
const PIT_HEIGHT: f32 = 24.0;

/// Frames in the coin spin
pub const COIN_FRAMES: usize = 8;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Rolls left along the surface
    Barrel,
    /// Drifts left through the tunnel
    Ghost,
    /// Scurries left along the tunnel floor
    Rat,
    /// Sits still on the surface
    Snake,
    /// Opens and closes in the surface; knocks health down to 1
    Pit,
    /// Currency, above and below ground
    Coin,
    /// Blocks running in the tunnel
    Wall,
    /// Connects the surface and the tunnel
    Ladder,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Barrel => "barrel",
            EntityKind::Ghost => "ghost",
            EntityKind::Rat => "rat",
            EntityKind::Snake => "snake",
            EntityKind::Pit => "pit",
            EntityKind::Coin => "coin",
            EntityKind::Wall => "wall",
            EntityKind::Ladder => "ladder",
        }
    }

    /// Animals are what the Dead Zone power-up clears out
    pub fn is_animal(&self) -> bool {
        matches!(self, EntityKind::Ghost | EntityKind::Rat | EntityKind::Snake)
    }

    /// Hazards cost one health point and vanish on contact
    pub fn is_hazard(&self) -> bool {
        self.is_animal() || *self == EntityKind::Barrel
    }

    /// Leftward displacement per tick
    pub fn speed(&self) -> f32 {
        match self {
            EntityKind::Barrel => 10.0,
            EntityKind::Ghost => 5.0,
            EntityKind::Rat => 8.0,
            _ => 0.0,
        }
    }

    /// Ticks each animation frame is held
    pub fn ticks_per_frame(&self) -> u32 {
        match self {
            EntityKind::Barrel | EntityKind::Coin => 1,
            EntityKind::Ghost | EntityKind::Rat => 3,
            EntityKind::Snake => 5,
            EntityKind::Pit => PIT_TICKS_PER_FRAME,
            EntityKind::Wall | EntityKind::Ladder => u32::MAX,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            EntityKind::Barrel | EntityKind::Ghost | EntityKind::Rat | EntityKind::Snake => 2,
            EntityKind::Coin => COIN_FRAMES,
            EntityKind::Pit => PIT_FRAMES,
            EntityKind::Wall | EntityKind::Ladder => 1,
        }
    }

    /// Sprite footprint of the given frame
    pub fn frame_size(&self, frame: usize) -> Vec2 {
        match self {
            EntityKind::Barrel => Vec2::new(44.0, 44.0),
            EntityKind::Ghost => Vec2::new(56.0, 64.0),
            EntityKind::Rat => Vec2::new(52.0, 26.0),
            EntityKind::Snake => Vec2::new(48.0, 40.0),
            EntityKind::Coin => Vec2::new(30.0, 30.0),
            EntityKind::Wall => Vec2::new(40.0, 106.0),
            EntityKind::Ladder => Vec2::new(60.0, 200.0),
            EntityKind::Pit => Vec2::new(pit_width(frame), PIT_HEIGHT),
        }
    }
}

/// Pit strip frame -> sprite width (closing frames mirror opening ones)
fn pit_width(frame: usize) -> f32 {
    let image = if frame < PIT_WIDTHS.len() {
        frame
    } else {
        (PIT_FRAMES - 1).saturating_sub(frame)
    };
    PIT_WIDTHS[image.min(PIT_WIDTHS.len() - 1)]
}

/// What touching an entity does to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Coin: removed, player is paid
    Collect,
    /// Moving hazard: removed, player loses a health point
    Damage,
    /// Open pit: stays, player health drops to 1
    ForceLowHealth,
    /// Walls, ladders, hidden pits
    Inert,
}

/// Pit visibility cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitCycle {
    /// x the pit was placed at; frames re-centre on this footprint
    pub origin_x: f32,
    pub visible: bool,
    pub hidden_ticks: u32,
    /// Set once the first full strip has played; afterwards the last frame hides the pit
    pub primed: bool,
}

/// A level entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub frame: usize,
    timer: u32,
    pit: Option<PitCycle>,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f32, y: f32) -> Self {
        let pit = (kind == EntityKind::Pit).then_some(PitCycle {
            origin_x: x,
            visible: true,
            hidden_ticks: 0,
            primed: false,
        });
        Self {
            kind,
            pos: Vec2::new(x, y),
            frame: 0,
            timer: 0,
            pit,
        }
    }

    /// Current bounding box
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.kind.frame_size(self.frame))
    }

    /// Hidden pits are neither drawn nor collidable
    pub fn is_visible(&self) -> bool {
        self.pit.as_ref().is_none_or(|p| p.visible)
    }

    pub fn pit_cycle(&self) -> Option<&PitCycle> {
        self.pit.as_ref()
    }

    /// Effect of the player overlapping this entity
    pub fn on_player_overlap(&self) -> Contact {
        match self.kind {
            EntityKind::Coin => Contact::Collect,
            EntityKind::Barrel | EntityKind::Ghost | EntityKind::Rat | EntityKind::Snake => {
                Contact::Damage
            }
            EntityKind::Pit if self.is_visible() => Contact::ForceLowHealth,
            EntityKind::Pit | EntityKind::Wall | EntityKind::Ladder => Contact::Inert,
        }
    }

    /// Advance one simulation tick: move and cycle frames
    pub fn advance(&mut self) {
        match self.kind {
            EntityKind::Wall | EntityKind::Ladder => {}
            EntityKind::Pit => self.advance_pit(),
            EntityKind::Coin => {
                self.frame = (self.frame + 1) % COIN_FRAMES;
            }
            EntityKind::Barrel | EntityKind::Ghost | EntityKind::Rat | EntityKind::Snake => {
                self.pos.x -= self.kind.speed();
                self.timer += 1;
                if self.timer >= self.kind.ticks_per_frame() {
                    self.timer = 0;
                    self.frame = (self.frame + 1) % self.kind.frame_count();
                }
            }
        }
    }

    fn advance_pit(&mut self) {
        let Some(cycle) = self.pit.as_mut() else {
            return;
        };

        if !cycle.visible {
            cycle.hidden_ticks += 1;
            if cycle.hidden_ticks >= PIT_HIDDEN_TICKS {
                cycle.visible = true;
                cycle.hidden_ticks = 0;
                self.timer = 0;
                self.frame = PIT_RESUME_FRAME;
                self.pos.x = cycle.origin_x + pit_width(0) / 2.0 - pit_width(self.frame) / 2.0;
            }
            return;
        }

        self.timer += 1;
        if self.timer < PIT_TICKS_PER_FRAME {
            return;
        }
        self.timer = 0;

        if self.frame >= PIT_FRAMES - 1 {
            // Only reachable on the first strip; later strips hide on arrival
            self.frame = 0;
            cycle.primed = true;
        } else {
            self.frame += 1;
            if self.frame == PIT_FRAMES - 1 && cycle.primed {
                cycle.visible = false;
                log::debug!("Pit at x={} closed", cycle.origin_x);
            }
        }
        self.pos.x = cycle.origin_x + pit_width(0) / 2.0 - pit_width(self.frame) / 2.0;
    }
}
