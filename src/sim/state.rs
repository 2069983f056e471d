//! Play session state
//!
//! Everything a running play session owns: the player, the current stage's
//! entities, the power-up inventory and the session RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::level::{LevelError, generate_level};
use super::player::Player;
use super::powerup::{ActivePowerUps, Inventory, PowerUp};
use crate::consts::*;

/// Things that happened during a tick or key press.
/// The screen layer turns these into sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    CoinCollected { amount: u64 },
    Damaged,
    FellInPit,
    StageCleared { stage: u32 },
    PowerUpActivated(PowerUp),
    SelectorMoved,
    Revived,
    Died,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Health ran out with no extra life to spend
    Lost,
}

/// Tunables a session is created with
#[derive(Debug, Clone, Copy)]
pub struct PlayConfig {
    pub seed: u64,
    pub coin_reward: u64,
    pub max_placement_attempts: u32,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            coin_reward: BASE_COIN_REWARD,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Complete play session state
#[derive(Debug, Clone)]
pub struct PlayState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub player: Player,
    /// Current stage, in placement order
    pub level: Vec<Entity>,
    /// Charges still owned (activation spends them)
    pub inventory: Inventory,
    pub powerups: ActivePowerUps,
    /// Index into [`PowerUp::ALL`] shown in the HUD selector
    pub selected: usize,
    /// Stages cleared this session
    pub stage: u32,
    pub time_ticks: u64,
    pub max_placement_attempts: u32,
    events: Vec<GameEvent>,
}

impl PlayState {
    /// Start a session and generate its first stage
    pub fn new(config: PlayConfig, inventory: Inventory) -> Result<Self, LevelError> {
        let mut state = Self::empty(config, inventory);
        state.regenerate()?;
        Ok(state)
    }

    /// A session with no stage generated yet
    pub fn empty(config: PlayConfig, inventory: Inventory) -> Self {
        Self {
            seed: config.seed,
            rng: Pcg32::seed_from_u64(config.seed),
            player: Player::default(),
            level: Vec::new(),
            inventory,
            powerups: ActivePowerUps::new(config.coin_reward),
            selected: 0,
            stage: 0,
            time_ticks: 0,
            max_placement_attempts: config.max_placement_attempts,
            events: Vec::new(),
        }
    }

    /// Replace the level with a freshly generated stage
    pub fn regenerate(&mut self) -> Result<(), LevelError> {
        self.level = generate_level(
            &mut self.rng,
            self.powerups.dead_zone(),
            self.max_placement_attempts,
        )?;
        Ok(())
    }

    /// Power-up currently under the HUD selector
    pub fn selected_power(&self) -> PowerUp {
        PowerUp::ALL[self.selected % PowerUp::ALL.len()]
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
