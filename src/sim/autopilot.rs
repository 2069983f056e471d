//! Demo-mode driver: produces key events that play a session unattended
//!
//! Runs right, jumps over whatever is coming on the surface and climbs back
//! up when a tunnel wall is in the way.

use super::entity::EntityKind;
use super::player::{Facing, PlayerState};
use super::state::PlayState;
use crate::consts::*;
use crate::platform::{Key, KeyEvent};

/// How far ahead (px) the autopilot looks for something to jump
const LOOKAHEAD: f32 = 90.0;

/// Keys to press this frame
pub fn autopilot_keys(state: &PlayState) -> Vec<KeyEvent> {
    let player = &state.player;
    let mut keys = Vec::new();

    match player.state {
        PlayerState::Stance => {
            if player.pos.y >= UNDERGROUND_PLANE && blocked_underground(state) {
                keys.push(KeyEvent::pressed(Key::Up));
            } else {
                keys.push(KeyEvent::pressed(Key::Right));
            }
        }
        PlayerState::Running => {
            if player.facing != Facing::Right {
                keys.push(KeyEvent::released(Key::Left));
                keys.push(KeyEvent::pressed(Key::Right));
            } else if player.pos.y <= GROUND_PLANE && danger_ahead(state) {
                keys.push(KeyEvent::pressed(Key::Space));
            }
        }
        PlayerState::Jumping | PlayerState::Climbing => {}
    }

    keys
}

fn danger_ahead(state: &PlayState) -> bool {
    let front = state.player.pos.x + PLAYER_WIDTH;
    state.level.iter().any(|e| {
        let surface = matches!(
            e.kind,
            EntityKind::Barrel | EntityKind::Snake | EntityKind::Pit
        );
        let rect = e.rect();
        surface && e.is_visible() && rect.x >= front && rect.x - front <= LOOKAHEAD
    })
}

fn blocked_underground(state: &PlayState) -> bool {
    let (_, blocked_right) = super::collision::wall_blocks(&state.level, &state.player);
    blocked_right
}
