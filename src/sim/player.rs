//! Player physics and state machine
//!
//! Acceleration is applied as a direct per-tick displacement; the vertical
//! position rests on a handful of fixed planes. Arrival at a plane always
//! assigns the plane value before anything compares against it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Discrete player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Idle
    Stance,
    Running,
    Jumping,
    Climbing,
}

/// Facing direction (rendering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Sprite animation set for a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Running,
    Jumping,
    Climbing,
}

impl PlayerAnim {
    pub fn for_state(state: PlayerState) -> Self {
        match state {
            PlayerState::Stance => PlayerAnim::Idle,
            PlayerState::Running => PlayerAnim::Running,
            PlayerState::Jumping => PlayerAnim::Jumping,
            PlayerState::Climbing => PlayerAnim::Climbing,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            PlayerAnim::Running => 6,
            _ => 4,
        }
    }

    pub fn ticks_per_frame(&self) -> u32 {
        match self {
            PlayerAnim::Idle => 2,
            _ => 1,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Displacement applied during the last tick
    pub vel: Vec2,
    /// Per-tick displacement
    pub acc: Vec2,
    pub state: PlayerState,
    pub facing: Facing,
    pub health: u8,
    pub score: u64,
    /// Coins collected this session (not yet merged into the saved total)
    pub coins: u64,
    /// Second jump already spent this airborne period
    pub doubled: bool,
    pub anim_frame: usize,
    pub anim_timer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            state: PlayerState::Stance,
            facing: Facing::Right,
            health: MAX_HEALTH,
            score: 0,
            coins: 0,
            doubled: false,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    /// Bounding box for contact tests
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn anim(&self) -> PlayerAnim {
        PlayerAnim::for_state(self.state)
    }

    /// Lose one health point (never below 1)
    pub fn damage(&mut self) {
        self.health = self.health.saturating_sub(1).max(1);
    }

    /// Put the player back at the spawn point with full health
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
        self.acc = Vec2::ZERO;
        self.state = PlayerState::Stance;
        self.doubled = false;
        self.health = MAX_HEALTH;
    }

    // === Input ===

    /// Horizontal key pressed
    pub fn press_direction(&mut self, facing: Facing) {
        match self.state {
            PlayerState::Climbing => {}
            PlayerState::Jumping => {
                self.facing = facing;
                self.acc.x = RUN_ACCEL * facing.sign();
            }
            PlayerState::Stance | PlayerState::Running => {
                self.facing = facing;
                self.state = PlayerState::Running;
            }
        }
    }

    /// Horizontal key released; keys other than the one being held are ignored
    pub fn release_direction(&mut self, facing: Facing) {
        if facing != self.facing {
            return;
        }
        match self.state {
            PlayerState::Running => self.state = PlayerState::Stance,
            PlayerState::Jumping => self.acc.x = 0.0,
            _ => {}
        }
    }

    /// Jump key pressed. Returns true when a jump (first or second) started.
    pub fn jump(&mut self) -> bool {
        if self.state == PlayerState::Jumping {
            if self.doubled {
                return false;
            }
            self.doubled = true;
            return self.launch();
        }
        self.state = PlayerState::Jumping;
        self.launch()
    }

    fn launch(&mut self) -> bool {
        if self.pos.y >= UNDERGROUND_PLANE {
            // No headroom in the tunnel
            self.state = PlayerState::Stance;
            return false;
        }
        self.acc.y = -JUMP_ACCEL;
        if self.acc.x != 0.0 && !self.doubled {
            self.acc.x *= JUMP_BOOST;
        }
        true
    }

    /// Start climbing down a ladder
    pub fn climb_down(&mut self) {
        self.acc.y = CLIMB_FALL_ACCEL;
        self.acc.x = 0.0;
        self.vel.x = 0.0;
        self.state = PlayerState::Climbing;
    }

    /// Start climbing up a ladder
    pub fn climb_up(&mut self) {
        self.acc.y = CLIMB_RISE_ACCEL;
        self.acc.x = 0.0;
        self.vel.x = 0.0;
        self.state = PlayerState::Climbing;
    }

    pub fn can_grab_ladder(&self) -> bool {
        matches!(self.state, PlayerState::Stance | PlayerState::Running)
    }

    // === Per-tick update ===

    /// Apply the state's horizontal drive. `blocked_left`/`blocked_right`
    /// report walls overlapping the player on that side.
    pub fn drive(&mut self, blocked_left: bool, blocked_right: bool) {
        match self.state {
            PlayerState::Stance => {
                self.acc.x = 0.0;
                self.doubled = false;
            }
            PlayerState::Running => {
                self.doubled = false;
                let blocked = match self.facing {
                    Facing::Left => blocked_left,
                    Facing::Right => blocked_right,
                };
                if blocked {
                    self.acc.x = 0.0;
                    self.state = PlayerState::Stance;
                } else {
                    self.acc.x = RUN_ACCEL * self.facing.sign();
                }
            }
            PlayerState::Climbing => {
                self.doubled = false;
                self.acc.x = 0.0;
            }
            PlayerState::Jumping => {}
        }
    }

    /// Integrate one tick of motion and settle on planes
    pub fn integrate(&mut self) {
        let prev = self.pos;

        self.pos += self.acc;
        if self.state == PlayerState::Climbing && self.acc.y < 0.0 {
            self.pos.y -= CLIMB_ASSIST;
        }
        self.pos.x = self.pos.x.max(0.0);
        self.vel = self.pos - prev;

        // Underground floor
        if self.pos.y > UNDERGROUND_PLANE {
            self.pos.y = UNDERGROUND_PLANE;
            self.settle(PlayerState::Stance);
        }

        // Top of a ladder
        if self.acc.y == CLIMB_RISE_ACCEL && self.pos.y <= GROUND_PLANE {
            self.pos.y = GROUND_PLANE;
            self.settle(PlayerState::Stance);
        }

        if self.acc.y <= -JUMP_ACCEL {
            if self.pos.y <= APEX_PLANE {
                self.pos.y = APEX_PLANE;
                self.acc.y = JUMP_ACCEL;
            } else if self.pos.y == UNDERGROUND_APEX_PLANE {
                self.acc.y = JUMP_ACCEL;
            } else if self.pos.y >= UNDERGROUND_FLOOR - PLAYER_HEIGHT {
                self.settle(PlayerState::Stance);
            }
        }

        // Landing back on the ground plane
        if self.acc.y >= JUMP_ACCEL && prev.y < GROUND_PLANE && self.pos.y >= GROUND_PLANE {
            self.pos.y = GROUND_PLANE;
            if self.acc.x != 0.0 {
                self.acc.x /= JUMP_BOOST;
                self.settle(PlayerState::Running);
            } else {
                self.settle(PlayerState::Stance);
            }
        }
    }

    fn settle(&mut self, state: PlayerState) {
        self.acc.y = 0.0;
        self.vel.y = 0.0;
        self.doubled = false;
        self.state = state;
    }

    /// Advance the sprite animation for the current state
    pub fn animate(&mut self) {
        let anim = self.anim();
        self.anim_timer += 1;
        if self.anim_frame >= anim.frame_count() {
            self.anim_frame = 0;
        }
        if self.anim_timer >= anim.ticks_per_frame() {
            self.anim_timer = 0;
            self.anim_frame = (self.anim_frame + 1) % anim.frame_count();
        }
    }
}
