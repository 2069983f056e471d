//! Power-ups: catalog, inventory and per-session activation

use serde::{Deserialize, Serialize};

use crate::consts::BASE_COIN_REWARD;

/// Purchasable power-ups, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    DoubleCoins,
    QuadrupleCoins,
    ExtraLife,
    DeadZone,
}

impl PowerUp {
    /// In-game selector order (Q/E cycle through this)
    pub const ALL: [PowerUp; 4] = [
        PowerUp::DoubleCoins,
        PowerUp::QuadrupleCoins,
        PowerUp::ExtraLife,
        PowerUp::DeadZone,
    ];

    /// Store shelf order
    pub const CATALOG: [PowerUp; 4] = [
        PowerUp::DoubleCoins,
        PowerUp::QuadrupleCoins,
        PowerUp::DeadZone,
        PowerUp::ExtraLife,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerUp::DoubleCoins => "2x Coins",
            PowerUp::QuadrupleCoins => "4x Coins",
            PowerUp::ExtraLife => "Extra Life",
            PowerUp::DeadZone => "Dead Zone",
        }
    }

    /// Store price in coins
    pub fn cost(&self) -> u64 {
        match self {
            PowerUp::DoubleCoins => 250,
            PowerUp::QuadrupleCoins => 500,
            PowerUp::ExtraLife | PowerUp::DeadZone => 100,
        }
    }

    /// Coin reward multiplier applied on activation
    pub fn coin_multiplier(&self) -> u64 {
        match self {
            PowerUp::DoubleCoins => 2,
            PowerUp::QuadrupleCoins => 4,
            _ => 1,
        }
    }
}

/// Owned charges of each power-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub double_coins: u64,
    pub quadruple_coins: u64,
    pub extra_life: u64,
    pub dead_zone: u64,
}

impl Inventory {
    pub fn count(&self, power: PowerUp) -> u64 {
        match power {
            PowerUp::DoubleCoins => self.double_coins,
            PowerUp::QuadrupleCoins => self.quadruple_coins,
            PowerUp::ExtraLife => self.extra_life,
            PowerUp::DeadZone => self.dead_zone,
        }
    }

    pub fn count_mut(&mut self, power: PowerUp) -> &mut u64 {
        match power {
            PowerUp::DoubleCoins => &mut self.double_coins,
            PowerUp::QuadrupleCoins => &mut self.quadruple_coins,
            PowerUp::ExtraLife => &mut self.extra_life,
            PowerUp::DeadZone => &mut self.dead_zone,
        }
    }
}

/// Power-ups switched on during the current play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePowerUps {
    active: Vec<PowerUp>,
    /// Coins paid per collected coin
    pub coin_reward: u64,
    /// The extra life has already brought the player back
    pub revived: bool,
}

impl Default for ActivePowerUps {
    fn default() -> Self {
        Self::new(BASE_COIN_REWARD)
    }
}

impl ActivePowerUps {
    pub fn new(coin_reward: u64) -> Self {
        Self {
            active: Vec::new(),
            coin_reward,
            revived: false,
        }
    }

    pub fn is_active(&self, power: PowerUp) -> bool {
        self.active.contains(&power)
    }

    pub fn dead_zone(&self) -> bool {
        self.is_active(PowerUp::DeadZone)
    }

    /// An extra life is armed and not yet spent
    pub fn has_spare_life(&self) -> bool {
        self.is_active(PowerUp::ExtraLife) && !self.revived
    }

    /// Spend one charge from `inventory` and switch `power` on.
    ///
    /// Returns false (and changes nothing) if it is already on or no charge is left.
    pub fn activate(&mut self, power: PowerUp, inventory: &mut Inventory) -> bool {
        if self.is_active(power) {
            return false;
        }
        let count = inventory.count_mut(power);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        self.active.push(power);
        self.coin_reward *= power.coin_multiplier();
        true
    }
}
