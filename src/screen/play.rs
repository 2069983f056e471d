//! Play screen: runs a play session and draws the HUD

use glam::Vec2;

use super::{LoseSummary, ScreenContext, SessionError, Transition};
use crate::audio::{AudioCue, MusicTrack, SoundEffect};
use crate::persistence::{self, Progression, ProgressionStore, SessionRecord, StoreError};
use crate::platform::{Key, KeyEvent};
use crate::renderer::{BLACK, Backdrop, GOLD, Sprite, Surface, WHITE, font};
use crate::sim::{self, Facing, GameEvent, PlayConfig, PlayState, TickOutcome};

const FLOOR_POS: Vec2 = Vec2::new(0.0, 474.0);
const COIN_ICON_POS: Vec2 = Vec2::new(60.0, 90.0);
const COIN_TEXT_POS: Vec2 = Vec2::new(104.0, 90.0);
const Q_KEY_POS: Vec2 = Vec2::new(280.0, 46.0);
const E_KEY_POS: Vec2 = Vec2::new(377.0, 46.0);
const POWER_ICON_POS: Vec2 = Vec2::new(323.0, 37.0);
const ICON_PLACER_POS: Vec2 = Vec2::new(350.0, 65.0);
const ICON_PLACER_SIZE: f32 = 24.0;
const HEALTH_BAR_POS: Vec2 = Vec2::new(28.0, 28.0);
/// Score and high score are right-aligned to this x
const SCORE_RIGHT: f32 = 1000.0;
const SCORE_Y: f32 = 28.0;
const HIGH_SCORE_Y: f32 = 58.0;

#[derive(Debug)]
pub struct PlayScreen {
    state: PlayState,
    /// Saved coin total when the session started
    saved_coins: u64,
    /// Saved high score when the session started
    high_score: u64,
    /// Session already merged into the save
    committed: bool,
}

impl PlayScreen {
    /// Load the saved inventory and generate the first stage
    pub fn start(config: PlayConfig, store: &dyn ProgressionStore) -> Result<Self, SessionError> {
        let saved = Progression::load(store)?;
        let state = PlayState::new(config, saved.inventory)?;
        log::info!(
            "Play session started (seed {}, {} coins saved)",
            config.seed,
            saved.coins
        );
        Ok(Self {
            state,
            saved_coins: saved.coins,
            high_score: saved.high_score,
            committed: false,
        })
    }

    pub fn state(&self) -> &PlayState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayState {
        &mut self.state
    }

    /// Merge this session into the save. Only the first call writes.
    pub fn commit(
        &mut self,
        store: &mut dyn ProgressionStore,
    ) -> Result<Option<Progression>, StoreError> {
        if self.committed {
            return Ok(None);
        }
        let record = SessionRecord {
            earned_coins: self.state.player.coins,
            score: self.state.player.score,
            inventory: self.state.inventory,
        };
        let saved = persistence::commit_session(store, &record)?;
        self.committed = true;
        Ok(Some(saved))
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent, ctx: &mut ScreenContext) -> Transition {
        sim::handle_key(&mut self.state, key);
        self.forward_events(ctx);
        Transition::None
    }

    pub(super) fn update(&mut self, ctx: &mut ScreenContext) -> Result<Transition, SessionError> {
        let outcome = sim::tick(&mut self.state)?;
        self.forward_events(ctx);
        if outcome == TickOutcome::Continue {
            return Ok(Transition::None);
        }

        let saved = match self.commit(&mut *ctx.store)? {
            Some(saved) => saved,
            None => Progression::load(&*ctx.store)?,
        };
        ctx.cue(AudioCue::StopMusic);
        ctx.cue(AudioCue::Music {
            track: MusicTrack::Defeat,
            looping: false,
        });
        Ok(Transition::Lose(LoseSummary {
            score: self.state.player.score,
            high_score: saved.high_score,
            total_coins: saved.coins,
            earned_coins: self.state.player.coins,
        }))
    }

    fn forward_events(&mut self, ctx: &mut ScreenContext) {
        for event in self.state.drain_events() {
            let effect = match event {
                GameEvent::Jumped => SoundEffect::Jump,
                GameEvent::CoinCollected { .. } => SoundEffect::Collect,
                GameEvent::Damaged | GameEvent::FellInPit => SoundEffect::Damage,
                GameEvent::PowerUpActivated(_) | GameEvent::Revived => SoundEffect::PowerUp,
                GameEvent::SelectorMoved => SoundEffect::MenuMove,
                GameEvent::Died => SoundEffect::Death,
                GameEvent::StageCleared { .. } => continue,
            };
            ctx.cue(AudioCue::Sound(effect));
        }
    }

    pub(super) fn draw(&self, surface: &mut dyn Surface) {
        let player = &self.state.player;

        surface.clear(BLACK);
        surface.blit(Sprite::Backdrop(Backdrop::Play), Vec2::ZERO, false);
        surface.blit(Sprite::Floor, FLOOR_POS, false);

        // Coins and power-up selector
        surface.blit(Sprite::CoinIcon, COIN_ICON_POS, false);
        let coins = (self.saved_coins + player.coins).to_string();
        surface.text(&coins, font::TEXT, WHITE, COIN_TEXT_POS);
        surface.blit(Sprite::KeyCap(Key::Q), Q_KEY_POS, false);
        surface.blit(Sprite::KeyCap(Key::E), E_KEY_POS, false);
        let power = self.state.selected_power();
        surface.blit(Sprite::PowerIcon(power), POWER_ICON_POS, false);
        surface.blit(Sprite::IconPlacer, ICON_PLACER_POS, false);
        let badge = if self.state.powerups.is_active(power) {
            "!".to_string()
        } else {
            self.state.inventory.count(power).to_string()
        };
        let w = surface.text_width(&badge, font::BADGE);
        let inset = Vec2::new(
            (ICON_PLACER_SIZE - w) / 2.0,
            (ICON_PLACER_SIZE - font::BADGE) / 2.0,
        );
        surface.text(&badge, font::BADGE, WHITE, ICON_PLACER_POS + inset);

        for entity in self.state.level.iter().filter(|e| e.is_visible()) {
            let sprite = Sprite::Entity {
                kind: entity.kind,
                frame: entity.frame,
            };
            surface.blit(sprite, entity.pos, false);
        }

        let sprite = Sprite::Player {
            anim: player.anim(),
            frame: player.anim_frame,
        };
        surface.blit(sprite, player.pos, player.facing == Facing::Left);

        surface.blit(Sprite::HealthBar(player.health), HEALTH_BAR_POS, false);
        let score = player.score.to_string();
        let w = surface.text_width(&score, font::TEXT);
        surface.text(&score, font::TEXT, WHITE, Vec2::new(SCORE_RIGHT - w, SCORE_Y));
        let high_score = self.high_score.to_string();
        let w = surface.text_width(&high_score, font::TEXT);
        surface.text(
            &high_score,
            font::TEXT,
            GOLD,
            Vec2::new(SCORE_RIGHT - w, HIGH_SCORE_Y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, ProgressKey};
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::{Entity, EntityKind};

    fn screen(store: &MemoryStore) -> PlayScreen {
        let mut play = PlayScreen::start(PlayConfig::default(), store).unwrap();
        play.state_mut().level.clear();
        play
    }

    fn run<R>(
        store: &mut MemoryStore,
        f: impl FnOnce(&mut ScreenContext) -> R,
    ) -> (R, Vec<AudioCue>) {
        let mut cues = Vec::new();
        let mut ctx = ScreenContext {
            store,
            cues: &mut cues,
        };
        let r = f(&mut ctx);
        (r, cues)
    }

    #[test]
    fn test_start_uses_saved_inventory() {
        let store = MemoryStore::new().with(ProgressKey::ExtraLife, 2);
        let play = PlayScreen::start(PlayConfig::default(), &store).unwrap();
        assert_eq!(play.state().inventory.extra_life, 2);
        assert!(!play.state().level.is_empty());
    }

    #[test]
    fn test_events_become_cues() {
        let mut store = MemoryStore::new();
        let mut play = screen(&store);
        let (_, cues) = run(&mut store, |ctx| {
            play.handle_key(KeyEvent::pressed(Key::Space), ctx);
            play.handle_key(KeyEvent::pressed(Key::E), ctx);
        });
        assert_eq!(
            cues,
            vec![
                AudioCue::Sound(SoundEffect::Jump),
                AudioCue::Sound(SoundEffect::MenuMove),
            ]
        );
    }

    #[test]
    fn test_coin_pickup_cue() {
        let mut store = MemoryStore::new();
        let mut play = screen(&store);
        let pos = play.state().player.pos;
        play.state_mut()
            .level
            .push(Entity::new(EntityKind::Coin, pos.x + 10.0, pos.y + 20.0));
        let (t, cues) = run(&mut store, |ctx| play.update(ctx).unwrap());
        assert_eq!(t, Transition::None);
        assert_eq!(cues, vec![AudioCue::Sound(SoundEffect::Collect)]);
        assert_eq!(play.state().player.coins, 10);
    }

    #[test]
    fn test_death_commits_once() {
        let mut store = MemoryStore::new().with(ProgressKey::Coins, 5);
        let mut play = screen(&store);
        play.state_mut().player.health = 1;
        play.state_mut().player.coins = 20;
        let (t, cues) = run(&mut store, |ctx| play.update(ctx).unwrap());
        assert_eq!(
            t,
            Transition::Lose(LoseSummary {
                score: 0,
                high_score: 0,
                total_coins: 25,
                earned_coins: 20,
            })
        );
        assert!(cues.contains(&AudioCue::Sound(SoundEffect::Death)));
        assert_eq!(play.commit(&mut store).unwrap(), None);
        assert_eq!(store.read(ProgressKey::Coins).unwrap(), 25);
    }

    #[test]
    fn test_hud_layout() {
        let store = MemoryStore::new()
            .with(ProgressKey::Coins, 70)
            .with(ProgressKey::HighScore, 900)
            .with(ProgressKey::DoubleCoins, 3);
        let mut play = screen(&store);
        play.state_mut().player.score = 400;
        let mut surface = RecordingSurface::new();
        play.draw(&mut surface);

        let text_at = |text: &str| match surface.find_text(text) {
            Some(DrawCommand::Text { pos, color, .. }) => (*pos, *color),
            other => panic!("missing {text}: {other:?}"),
        };
        assert_eq!(text_at("70"), (Vec2::new(104.0, 90.0), WHITE));
        // 3 glyphs * 12px
        assert_eq!(text_at("400"), (Vec2::new(964.0, 28.0), WHITE));
        assert_eq!(text_at("900"), (Vec2::new(964.0, 58.0), GOLD));
        assert!(surface.find_text("3").is_some());
        assert!(
            surface
                .blits()
                .any(|(s, pos, _)| *s == Sprite::HealthBar(6) && pos == Vec2::new(28.0, 28.0))
        );
    }

    #[test]
    fn test_active_power_shows_bang() {
        let mut store = MemoryStore::new().with(ProgressKey::DoubleCoins, 1);
        let mut play = screen(&store);
        run(&mut store, |ctx| {
            play.handle_key(KeyEvent::pressed(Key::Enter), ctx);
        });
        let mut surface = RecordingSurface::new();
        play.draw(&mut surface);
        assert!(surface.find_text("!").is_some());
    }

    #[test]
    fn test_hidden_pit_not_drawn_and_player_flips() {
        let store = MemoryStore::new();
        let mut play = screen(&store);
        let mut pit = Entity::new(EntityKind::Pit, 300.0, 485.0);
        // Run the pit into its hidden phase
        while pit.is_visible() {
            pit.advance();
        }
        play.state_mut().level.push(pit);
        play.state_mut().level.push(Entity::new(EntityKind::Barrel, 600.0, 474.0));
        play.state_mut().player.facing = Facing::Left;

        let mut surface = RecordingSurface::new();
        play.draw(&mut surface);
        let kinds: Vec<_> = surface
            .blits()
            .filter_map(|(s, _, _)| match s {
                Sprite::Entity { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![EntityKind::Barrel]);
        assert!(
            surface
                .blits()
                .any(|(s, _, flip)| matches!(s, Sprite::Player { .. }) && flip)
        );
    }
}
