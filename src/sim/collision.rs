//! Contact resolution between the player and level entities
//!
//! Removal happens through `retain`, so an entity being taken out of the
//! level never causes its neighbour to be skipped or visited twice.

use super::entity::{Contact, Entity, EntityKind};
use super::player::Player;
use super::rect::Rect;

/// What the player ran into during one contact pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    /// Coins picked up (and removed)
    pub collected: u32,
    /// Hazards hit (and removed)
    pub hazards: u32,
    /// Open pits stepped into
    pub pits: u32,
}

impl ContactReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Test every entity against the player box, dropping collected coins and
/// spent hazards from `level`
pub fn resolve_contacts(level: &mut Vec<Entity>, player: Rect) -> ContactReport {
    let mut report = ContactReport::default();

    level.retain(|entity| {
        if !entity.rect().overlaps(&player) {
            return true;
        }
        match entity.on_player_overlap() {
            Contact::Collect => {
                report.collected += 1;
                false
            }
            Contact::Damage => {
                report.hazards += 1;
                false
            }
            Contact::ForceLowHealth => {
                report.pits += 1;
                true
            }
            Contact::Inert => true,
        }
    });

    report
}

/// Walls overlapping the player, split by side: (blocked_left, blocked_right)
pub fn wall_blocks(level: &[Entity], player: &Player) -> (bool, bool) {
    let rect = player.rect();
    let mut blocked = (false, false);
    for wall in level
        .iter()
        .filter(|e| e.kind == EntityKind::Wall && e.rect().overlaps(&rect))
    {
        if wall.pos.x < player.pos.x {
            blocked.0 = true;
        } else if wall.pos.x > player.pos.x {
            blocked.1 = true;
        }
    }
    blocked
}

/// Whether the player is standing at a ladder
pub fn touching_ladder(level: &[Entity], player: Rect) -> bool {
    level
        .iter()
        .any(|e| e.kind == EntityKind::Ladder && e.rect().overlaps(&player))
}

/// Drop every animal from the level; returns how many were removed
pub fn clear_animals(level: &mut Vec<Entity>) -> usize {
    let before = level.len();
    level.retain(|e| !e.kind.is_animal());
    before - level.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_adjacent_removals_are_not_skipped() {
        let player = Player::default();
        let x = player.pos.x;
        // Two coins and a barrel back to back, all under the player
        let mut level = vec![
            Entity::new(EntityKind::Coin, x, 483.0),
            Entity::new(EntityKind::Coin, x + 5.0, 483.0),
            Entity::new(EntityKind::Barrel, x + 10.0, 474.0),
            Entity::new(EntityKind::Coin, 900.0, 483.0),
        ];
        let report = resolve_contacts(&mut level, player.rect());
        assert_eq!(report.collected, 2);
        assert_eq!(report.hazards, 1);
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].pos.x, 900.0);
    }

    #[test]
    fn test_pits_stay() {
        let player = Player::default();
        let mut level = vec![Entity::new(EntityKind::Pit, player.pos.x - 20.0, 485.0)];
        let report = resolve_contacts(&mut level, player.rect());
        assert_eq!(report.pits, 1);
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_no_contact() {
        let player = Player::default();
        let mut level = vec![Entity::new(EntityKind::Rat, 600.0, 679.0)];
        assert!(resolve_contacts(&mut level, player.rect()).is_empty());
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_wall_sides() {
        let player = Player::new(300.0, UNDERGROUND_PLANE);
        let right = vec![Entity::new(EntityKind::Wall, 340.0, 584.0)];
        assert_eq!(wall_blocks(&right, &player), (false, true));
        let left = vec![Entity::new(EntityKind::Wall, 270.0, 584.0)];
        assert_eq!(wall_blocks(&left, &player), (true, false));

        // Walls live in the tunnel; they never block the surface
        let surface = Player::new(300.0, GROUND_PLANE);
        assert_eq!(wall_blocks(&right, &surface), (false, false));
    }

    #[test]
    fn test_ladder_reachable_from_both_planes() {
        let level = vec![Entity::new(EntityKind::Ladder, 290.0, 492.0)];
        assert!(touching_ladder(&level, Player::new(300.0, GROUND_PLANE).rect()));
        assert!(touching_ladder(&level, Player::new(300.0, UNDERGROUND_PLANE).rect()));
        assert!(!touching_ladder(&level, Player::new(500.0, GROUND_PLANE).rect()));
    }

    #[test]
    fn test_clear_animals() {
        let mut level = vec![
            Entity::new(EntityKind::Ghost, 200.0, 605.0),
            Entity::new(EntityKind::Barrel, 300.0, 474.0),
            Entity::new(EntityKind::Rat, 400.0, 679.0),
            Entity::new(EntityKind::Snake, 500.0, 466.0),
            Entity::new(EntityKind::Coin, 600.0, 483.0),
        ];
        assert_eq!(clear_animals(&mut level), 3);
        assert_eq!(level.len(), 2);
    }
}
