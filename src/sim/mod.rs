//! Gameplay simulation
//!
//! All gameplay logic lives here. No rendering, audio or file access:
//! - Seeded RNG only
//! - Placement order is iteration order
//! - Events are recorded for the presentation layer to consume

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod level;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_keys;
pub use collision::{ContactReport, clear_animals, resolve_contacts, touching_ladder, wall_blocks};
pub use entity::{Contact, Entity, EntityKind};
pub use level::{LevelComposition, LevelError, generate_level, generate_with_composition};
pub use player::{Facing, Player, PlayerAnim, PlayerState};
pub use powerup::{ActivePowerUps, Inventory, PowerUp};
pub use rect::Rect;
pub use state::{GameEvent, PlayConfig, PlayState, TickOutcome};
pub use tick::{activate_power, handle_key, tick};
