//! Pitfall - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Gameplay simulation (player physics, entities, level generation, play state)
//! - `screen`: Menu/store/play/lose screens and the session manager that owns them
//! - `persistence`: Persisted progression (coins, high score, power-up inventory)
//! - `renderer`: Draw surface contract and a recording surface
//! - `platform`: Input event model
//! - `audio`: Sound cues and music tracks
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod sim;

pub use screen::{SessionError, SessionManager};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (one tick per rendered frame)
    pub const FPS: u32 = 60;

    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Reaching this x ends the stage
    pub const STAGE_END_X: f32 = 1060.0;
    /// Score awarded per cleared stage
    pub const STAGE_SCORE: u64 = 100;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 60.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    /// Player sprite footprint
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 96.0;
    pub const MAX_HEALTH: u8 = 6;

    /// Resting plane: ground surface and ladder top
    pub const GROUND_PLANE: f32 = 400.0;
    /// Resting plane: underground floor
    pub const UNDERGROUND_PLANE: f32 = 600.0;
    /// Highest point of an above-ground jump
    pub const APEX_PLANE: f32 = 300.0;
    /// Rising through this plane underground turns the jump around
    pub const UNDERGROUND_APEX_PLANE: f32 = 604.0;
    /// Bottom of the underground tunnel
    pub const UNDERGROUND_FLOOR: f32 = 690.0;

    /// Horizontal displacement per tick while running
    pub const RUN_ACCEL: f32 = 15.0;
    /// Vertical displacement per tick while jumping
    pub const JUMP_ACCEL: f32 = 25.0;
    /// Horizontal boost applied by the first jump
    pub const JUMP_BOOST: f32 = 1.5;
    /// Vertical displacement per tick climbing up / down a ladder
    pub const CLIMB_RISE_ACCEL: f32 = -5.0;
    pub const CLIMB_FALL_ACCEL: f32 = 10.0;
    /// Extra pull applied per tick while climbing up
    pub const CLIMB_ASSIST: f32 = 17.0;

    /// Base coins per collected coin, before multipliers
    pub const BASE_COIN_REWARD: u64 = 10;
    /// Placement retries per entity before generation gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
}
