//! Per-tick play update and key handling
//!
//! One call to [`tick`] per rendered frame. Order within a tick:
//! 1. entities animate and move
//! 2. contacts against the player resolve (coins, hazards, pits)
//! 3. reaching the right edge starts the next stage
//! 4. the player moves
//! 5. health is checked for death or an extra-life revival

use super::collision::{clear_animals, resolve_contacts, touching_ladder, wall_blocks};
use super::level::LevelError;
use super::player::{Facing, PlayerState};
use super::powerup::PowerUp;
use super::state::{GameEvent, PlayState, TickOutcome};
use crate::consts::*;
use crate::platform::{Key, KeyAction, KeyEvent};

/// Advance the play session by one frame
pub fn tick(state: &mut PlayState) -> Result<TickOutcome, LevelError> {
    state.time_ticks += 1;

    for entity in &mut state.level {
        entity.advance();
    }

    // Contacts
    let report = resolve_contacts(&mut state.level, state.player.rect());
    for _ in 0..report.collected {
        let amount = state.powerups.coin_reward;
        state.player.coins += amount;
        state.emit(GameEvent::CoinCollected { amount });
    }
    for _ in 0..report.hazards {
        state.player.damage();
        state.emit(GameEvent::Damaged);
    }
    if report.pits > 0 {
        state.player.health = 1;
        state.emit(GameEvent::FellInPit);
    }

    // Next stage
    if state.player.pos.x >= STAGE_END_X {
        state.player.pos.x = 0.0;
        state.regenerate()?;
        state.player.score += STAGE_SCORE;
        state.stage += 1;
        log::info!("Stage {} cleared, score {}", state.stage, state.player.score);
        state.emit(GameEvent::StageCleared { stage: state.stage });
    }

    let (blocked_left, blocked_right) = wall_blocks(&state.level, &state.player);
    state.player.drive(blocked_left, blocked_right);
    state.player.integrate();
    state.player.animate();

    // Health
    if state.player.health <= 1 {
        if state.powerups.has_spare_life() {
            state.powerups.revived = true;
            state.player.respawn();
            log::info!("Extra life spent at stage {}", state.stage);
            state.emit(GameEvent::Revived);
        } else {
            log::info!(
                "Player died: score {}, coins {}",
                state.player.score,
                state.player.coins
            );
            state.emit(GameEvent::Died);
            return Ok(TickOutcome::Lost);
        }
    }

    Ok(TickOutcome::Continue)
}

/// Apply a key transition to the play session
pub fn handle_key(state: &mut PlayState, event: KeyEvent) {
    let player = &mut state.player;
    match (event.action, event.key) {
        (KeyAction::Pressed, Key::Right) => player.press_direction(Facing::Right),
        (KeyAction::Released, Key::Right) => player.release_direction(Facing::Right),
        (KeyAction::Pressed, Key::Left) => player.press_direction(Facing::Left),
        (KeyAction::Released, Key::Left) => player.release_direction(Facing::Left),
        (KeyAction::Pressed, Key::Space) => {
            let first = player.state != PlayerState::Jumping;
            if player.jump() && first {
                state.emit(GameEvent::Jumped);
            }
        }
        (KeyAction::Pressed, Key::Down) => {
            if player.can_grab_ladder() && touching_ladder(&state.level, player.rect()) {
                player.climb_down();
            }
        }
        (KeyAction::Pressed, Key::Up) => {
            if player.can_grab_ladder() && touching_ladder(&state.level, player.rect()) {
                player.climb_up();
            }
        }
        (KeyAction::Pressed, Key::Q) => {
            let len = PowerUp::ALL.len();
            state.selected = (state.selected + len - 1) % len;
            state.emit(GameEvent::SelectorMoved);
        }
        (KeyAction::Pressed, Key::E) => {
            state.selected = (state.selected + 1) % PowerUp::ALL.len();
            state.emit(GameEvent::SelectorMoved);
        }
        (KeyAction::Pressed, Key::Enter) => {
            let power = state.selected_power();
            activate_power(state, power);
        }
        _ => {}
    }
}

/// Switch a power-up on for the rest of the session.
/// Returns false if it was already on or none are owned.
pub fn activate_power(state: &mut PlayState, power: PowerUp) -> bool {
    if !state.powerups.activate(power, &mut state.inventory) {
        log::debug!("{} not activated", power.name());
        return false;
    }
    if power == PowerUp::DeadZone {
        let removed = clear_animals(&mut state.level);
        log::debug!("Dead zone cleared {removed} animals");
    }
    log::info!("Power-up activated: {}", power.name());
    state.emit(GameEvent::PowerUpActivated(power));
    true
}
