//! Procedural stage generation
//!
//! A stage is one of four fixed archetypes. Entities are placed kind by kind
//! at a fixed height and a random x, re-rolled until they overlap nothing
//! placed before them.

use rand::Rng;
use thiserror::Error;

use super::entity::{Entity, EntityKind};

/// Coins on the surface in every archetype
pub const SURFACE_COINS: u32 = 3;
/// Coins in the tunnel in every archetype
pub const UNDERGROUND_COINS: u32 = 2;

/// Stage generation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("could not place {kind} after {attempts} attempts: archetype counts do not fit the placement range")]
    PlacementExhausted { kind: &'static str, attempts: u32 },
}

/// Per-stage entity counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelComposition {
    pub ladders: u32,
    pub pits: u32,
    pub walls: u32,
    pub barrels: u32,
    pub snakes: u32,
    pub rats: u32,
    pub ghosts: u32,
    pub surface_coins: u32,
    pub underground_coins: u32,
}

impl LevelComposition {
    /// Counts for archetype 1..=4
    pub fn archetype(kind: u8) -> Self {
        let (ladders, pits, walls, barrels, snakes, rats, ghosts) = match kind {
            1 => (1, 0, 1, 0, 0, 3, 0),
            2 => (1, 0, 1, 2, 0, 0, 2),
            3 => (0, 0, 1, 1, 2, 0, 0),
            _ => (0, 1, 0, 0, 0, 5, 0),
        };
        Self {
            ladders,
            pits,
            walls,
            barrels,
            snakes,
            rats,
            ghosts,
            surface_coins: SURFACE_COINS,
            underground_coins: UNDERGROUND_COINS,
        }
    }

    /// Dead Zone keeps every animal out of the stage
    pub fn without_animals(mut self) -> Self {
        self.snakes = 0;
        self.rats = 0;
        self.ghosts = 0;
        self
    }

    /// Placement passes in generation order: (kind, count, x range, y)
    fn passes(&self) -> [(EntityKind, u32, (i32, i32), f32); 9] {
        [
            (EntityKind::Pit, self.pits, (140, 555), 485.0),
            (EntityKind::Ladder, self.ladders, (140, 1010), 492.0),
            (EntityKind::Barrel, self.barrels, (140, 1010), 474.0),
            (EntityKind::Wall, self.walls, (140, 1010), 584.0),
            (EntityKind::Coin, self.surface_coins, (140, 1010), 483.0),
            (EntityKind::Coin, self.underground_coins, (140, 1010), 670.0),
            (EntityKind::Ghost, self.ghosts, (140, 1010), 605.0),
            (EntityKind::Rat, self.rats, (140, 1010), 679.0),
            (EntityKind::Snake, self.snakes, (140, 1010), 466.0),
        ]
    }
}

/// Roll an archetype and build the stage
pub fn generate_level<R: Rng>(
    rng: &mut R,
    dead_zone: bool,
    max_attempts: u32,
) -> Result<Vec<Entity>, LevelError> {
    let archetype: u8 = rng.random_range(1..=4);
    let mut composition = LevelComposition::archetype(archetype);
    if dead_zone {
        composition = composition.without_animals();
    }
    log::info!("Generating stage: archetype {archetype}, dead zone {dead_zone}");
    generate_with_composition(rng, &composition, max_attempts)
}

/// Place every entity of `composition`, in generation order
pub fn generate_with_composition<R: Rng>(
    rng: &mut R,
    composition: &LevelComposition,
    max_attempts: u32,
) -> Result<Vec<Entity>, LevelError> {
    let mut level: Vec<Entity> = Vec::new();

    for (kind, count, (min_x, max_x), y) in composition.passes() {
        for _ in 0..count {
            let entity = place(rng, &level, kind, min_x, max_x, y, max_attempts)?;
            level.push(entity);
        }
    }

    log::debug!("Stage placed {} entities", level.len());
    Ok(level)
}

fn place<R: Rng>(
    rng: &mut R,
    placed: &[Entity],
    kind: EntityKind,
    min_x: i32,
    max_x: i32,
    y: f32,
    max_attempts: u32,
) -> Result<Entity, LevelError> {
    for _ in 0..max_attempts {
        let x = rng.random_range(min_x..=max_x) as f32;
        let candidate = Entity::new(kind, x, y);
        let rect = candidate.rect();
        if placed.iter().all(|other| !rect.overlaps(&other.rect())) {
            return Ok(candidate);
        }
    }
    Err(LevelError::PlacementExhausted {
        kind: kind.as_str(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_PLACEMENT_ATTEMPTS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn count(level: &[Entity], kind: EntityKind) -> u32 {
        level.iter().filter(|e| e.kind == kind).count() as u32
    }

    #[test]
    fn test_archetype_three_composition() {
        let mut rng = Pcg32::seed_from_u64(3);
        let composition = LevelComposition::archetype(3);
        let level = generate_with_composition(&mut rng, &composition, MAX_PLACEMENT_ATTEMPTS)
            .expect("archetype 3 fits");

        assert_eq!(count(&level, EntityKind::Ladder), 0);
        assert_eq!(count(&level, EntityKind::Pit), 0);
        assert_eq!(count(&level, EntityKind::Wall), 1);
        assert_eq!(count(&level, EntityKind::Barrel), 1);
        assert_eq!(count(&level, EntityKind::Snake), 2);
        assert_eq!(count(&level, EntityKind::Rat), 0);
        assert_eq!(count(&level, EntityKind::Ghost), 0);
        assert_eq!(count(&level, EntityKind::Coin), SURFACE_COINS + UNDERGROUND_COINS);
    }

    #[test]
    fn test_generation_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let level = generate_with_composition(
            &mut rng,
            &LevelComposition::archetype(2),
            MAX_PLACEMENT_ATTEMPTS,
        )
        .unwrap();
        let kinds: Vec<EntityKind> = level.iter().map(|e| e.kind).collect();
        assert_eq!(kinds[0], EntityKind::Ladder);
        assert_eq!(kinds[1], EntityKind::Barrel);
        assert_eq!(kinds[3], EntityKind::Wall);
        assert_eq!(*kinds.last().unwrap(), EntityKind::Ghost);
    }

    #[test]
    fn test_placement_heights_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let level = generate_with_composition(
            &mut rng,
            &LevelComposition::archetype(4),
            MAX_PLACEMENT_ATTEMPTS,
        )
        .unwrap();
        for entity in &level {
            match entity.kind {
                EntityKind::Pit => {
                    assert_eq!(entity.pos.y, 485.0);
                    assert!((140.0..=555.0).contains(&entity.pos.x));
                }
                EntityKind::Rat => assert_eq!(entity.pos.y, 679.0),
                EntityKind::Coin => assert!(entity.pos.y == 483.0 || entity.pos.y == 670.0),
                other => panic!("archetype 4 has no {other:?}"),
            }
        }
    }

    #[test]
    fn test_dead_zone_removes_animals() {
        for kind in 1..=4 {
            let composition = LevelComposition::archetype(kind).without_animals();
            assert_eq!(composition.ghosts + composition.rats + composition.snakes, 0);
        }
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let level = generate_level(&mut rng, true, MAX_PLACEMENT_ATTEMPTS).unwrap();
            assert!(level.iter().all(|e| !e.kind.is_animal()));
        }
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let mut rng = Pcg32::seed_from_u64(1);
        let crowded = LevelComposition {
            walls: 40,
            ..Default::default()
        };
        let err = generate_with_composition(&mut rng, &crowded, 50).unwrap_err();
        assert_eq!(
            err,
            LevelError::PlacementExhausted {
                kind: "wall",
                attempts: 50
            }
        );
    }

    proptest! {
        #[test]
        fn prop_generated_entities_never_overlap(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let level = generate_level(&mut rng, false, MAX_PLACEMENT_ATTEMPTS).unwrap();
            for (i, a) in level.iter().enumerate() {
                for b in &level[i + 1..] {
                    prop_assert!(!a.rect().overlaps(&b.rect()), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
}
