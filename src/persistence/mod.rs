//! Persisted progression
//!
//! The save is a flat key-value document of integers:
//! `Coins`, `High Score`, `2x Coins`, `4x Coins`, `Dead Zone`, `Extra Life`.
//! Everything above this module talks to it through [`ProgressionStore`].

mod json;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::sim::{Inventory, PowerUp};

pub use json::JsonFileStore;

/// Keys of the save document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressKey {
    Coins,
    HighScore,
    DoubleCoins,
    QuadrupleCoins,
    DeadZone,
    ExtraLife,
}

impl ProgressKey {
    pub const ALL: [ProgressKey; 6] = [
        ProgressKey::Coins,
        ProgressKey::HighScore,
        ProgressKey::DoubleCoins,
        ProgressKey::QuadrupleCoins,
        ProgressKey::DeadZone,
        ProgressKey::ExtraLife,
    ];

    /// Name as written in the save document
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressKey::Coins => "Coins",
            ProgressKey::HighScore => "High Score",
            ProgressKey::DoubleCoins => "2x Coins",
            ProgressKey::QuadrupleCoins => "4x Coins",
            ProgressKey::DeadZone => "Dead Zone",
            ProgressKey::ExtraLife => "Extra Life",
        }
    }

    /// Inventory key for a power-up
    pub fn for_power(power: PowerUp) -> Self {
        match power {
            PowerUp::DoubleCoins => ProgressKey::DoubleCoins,
            PowerUp::QuadrupleCoins => ProgressKey::QuadrupleCoins,
            PowerUp::DeadZone => ProgressKey::DeadZone,
            PowerUp::ExtraLife => ProgressKey::ExtraLife,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read save file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write save file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save file {path} is not a JSON object: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("save key \"{key}\" holds {value}, expected a non-negative integer")]
    InvalidValue { key: &'static str, value: String },
}

/// Read/write contract of the persisted save
pub trait ProgressionStore {
    /// Value stored under `key`; keys never written read as 0
    fn read(&self, key: ProgressKey) -> Result<u64, StoreError>;
    fn write(&mut self, key: ProgressKey, value: u64) -> Result<(), StoreError>;
}

/// In-memory store (tests, throwaway sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<ProgressKey, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: ProgressKey, value: u64) -> Self {
        self.values.insert(key, value);
        self
    }
}

impl ProgressionStore for MemoryStore {
    fn read(&self, key: ProgressKey) -> Result<u64, StoreError> {
        Ok(self.values.get(&key).copied().unwrap_or(0))
    }

    fn write(&mut self, key: ProgressKey, value: u64) -> Result<(), StoreError> {
        self.values.insert(key, value);
        Ok(())
    }
}

/// Snapshot of the saved progression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progression {
    pub coins: u64,
    pub high_score: u64,
    pub inventory: Inventory,
}

impl Progression {
    pub fn load(store: &dyn ProgressionStore) -> Result<Self, StoreError> {
        let mut inventory = Inventory::default();
        for power in PowerUp::ALL {
            *inventory.count_mut(power) = store.read(ProgressKey::for_power(power))?;
        }
        Ok(Self {
            coins: store.read(ProgressKey::Coins)?,
            high_score: store.read(ProgressKey::HighScore)?,
            inventory,
        })
    }
}

/// What a finished (or abandoned) play session hands back to the save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    /// Coins collected this session
    pub earned_coins: u64,
    pub score: u64,
    /// Charges left after the session's activations
    pub inventory: Inventory,
}

/// Merge a session into the save: coins are added to the stored total,
/// inventory counts replaced, and the high score raised if beaten.
pub fn commit_session(
    store: &mut dyn ProgressionStore,
    record: &SessionRecord,
) -> Result<Progression, StoreError> {
    let coins = store.read(ProgressKey::Coins)? + record.earned_coins;
    store.write(ProgressKey::Coins, coins)?;

    for power in PowerUp::ALL {
        store.write(ProgressKey::for_power(power), record.inventory.count(power))?;
    }

    let mut high_score = store.read(ProgressKey::HighScore)?;
    if record.score > high_score {
        high_score = record.score;
        store.write(ProgressKey::HighScore, high_score)?;
        log::info!("New high score: {high_score}");
    }

    log::info!(
        "Progression saved: {} coins (+{})",
        coins,
        record.earned_coins
    );
    Ok(Progression {
        coins,
        high_score,
        inventory: record.inventory,
    })
}

/// Buy one charge of `power` if the saved balance covers it.
/// Returns the new balance, or `None` if it was too expensive.
pub fn purchase(
    store: &mut dyn ProgressionStore,
    power: PowerUp,
) -> Result<Option<u64>, StoreError> {
    let coins = store.read(ProgressKey::Coins)?;
    let Some(balance) = coins.checked_sub(power.cost()) else {
        log::debug!("Cannot afford {} ({} < {})", power.name(), coins, power.cost());
        return Ok(None);
    };
    let key = ProgressKey::for_power(power);
    let owned = store.read(key)?;
    store.write(ProgressKey::Coins, balance)?;
    store.write(key, owned + 1)?;
    log::info!("Bought {} for {} coins", power.name(), power.cost());
    Ok(Some(balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_read_zero() {
        let store = MemoryStore::new();
        assert_eq!(Progression::load(&store).unwrap(), Progression::default());
    }

    #[test]
    fn test_commit_adds_coins_and_keeps_better_high_score() {
        let mut store = MemoryStore::new()
            .with(ProgressKey::Coins, 100)
            .with(ProgressKey::HighScore, 500);
        let record = SessionRecord {
            earned_coins: 30,
            score: 400,
            inventory: Inventory {
                extra_life: 2,
                ..Default::default()
            },
        };
        let saved = commit_session(&mut store, &record).unwrap();
        assert_eq!(saved.coins, 130);
        assert_eq!(saved.high_score, 500);
        assert_eq!(store.read(ProgressKey::HighScore).unwrap(), 500);
        assert_eq!(store.read(ProgressKey::ExtraLife).unwrap(), 2);
    }

    #[test]
    fn test_commit_raises_high_score() {
        let mut store = MemoryStore::new().with(ProgressKey::HighScore, 200);
        let record = SessionRecord {
            earned_coins: 0,
            score: 300,
            inventory: Inventory::default(),
        };
        commit_session(&mut store, &record).unwrap();
        assert_eq!(store.read(ProgressKey::HighScore).unwrap(), 300);
    }

    #[test]
    fn test_purchase() {
        let mut store = MemoryStore::new().with(ProgressKey::Coins, 300);
        assert_eq!(purchase(&mut store, PowerUp::DoubleCoins).unwrap(), Some(50));
        assert_eq!(store.read(ProgressKey::DoubleCoins).unwrap(), 1);
        assert_eq!(purchase(&mut store, PowerUp::ExtraLife).unwrap(), None);
        assert_eq!(store.read(ProgressKey::Coins).unwrap(), 50);
        assert_eq!(store.read(ProgressKey::ExtraLife).unwrap(), 0);
    }

    #[test]
    fn test_purchase_exact_balance() {
        let mut store = MemoryStore::new().with(ProgressKey::Coins, 100);
        assert_eq!(purchase(&mut store, PowerUp::DeadZone).unwrap(), Some(0));
        assert_eq!(store.read(ProgressKey::DeadZone).unwrap(), 1);
    }
}
