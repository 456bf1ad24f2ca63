//! Session progress: level-ups, game over, restart, reset
//!
//! Checkpoints only move forward; the only way back to level 1 is a full
//! reset.

use super::input::UiAction;
use super::overlay::LevelAnnouncement;
use super::state::{DeathCause, GameEvent, GamePhase, GameState, StatusMessage};
use crate::consts::*;
use crate::settings::CheckpointPolicy;

/// Level the debug shortcut jumps to, and the score it grants
pub const SKIP_TARGET_LEVEL: u32 = 3;
pub const SKIP_TARGET_SCORE: u64 = 200;

impl GameState {
    /// Leave the title screen and start playing
    pub fn start(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Title {
            return;
        }
        self.phase = GamePhase::Playing;
        self.timer.start(now_ms);
        self.emit(GameEvent::Started);
        log::info!("Run started");
    }

    /// The player touched the flag
    pub fn next_level(&mut self, now_ms: f64) {
        self.level += 1;
        self.score += LEVEL_SCORE_MULTIPLIER * self.level as u64;

        if self.level >= MAX_LEVEL {
            self.timer.stop(now_ms);
            let final_ms = self.timer.elapsed_ms(now_ms);
            self.set_status(
                StatusMessage::win(format!(
                    "🏆 LEVEL {MAX_LEVEL} REACHED! Final Time: {}",
                    self.timer.formatted(now_ms)
                )),
                None,
            );
            self.phase = GamePhase::Won;
            self.emit(GameEvent::Won {
                final_ms,
                score: self.score,
            });
            log::info!(
                "Level {} reached in {} with score {}",
                self.level,
                self.timer.formatted(now_ms),
                self.score
            );
            return;
        }

        let saved = self.save_checkpoint();
        let text = if saved {
            format!("Level {}! Progress Saved!", self.level)
        } else {
            format!("Level {}!", self.level)
        };
        self.set_status(
            StatusMessage::win(text),
            Some(now_ms + STATUS_CLEAR_DELAY_MS),
        );
        if self.settings.level_announcement {
            self.announcement = Some(LevelAnnouncement::new(self.level, now_ms));
        }

        self.reset_field();
        self.emit(GameEvent::LevelUp {
            level: self.level,
            score: self.score,
        });
        log::info!(
            "Level up: {} (score {}, checkpoint {})",
            self.level,
            self.score,
            self.checkpoint_level
        );
    }

    /// End the run as a loss
    pub fn game_over(&mut self, cause: DeathCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        let text = if self.checkpoint_level > 1 {
            format!("You died! Restarting from Level {}", self.checkpoint_level)
        } else {
            "You fell in the water! Game Over!".to_string()
        };
        self.set_status(StatusMessage::lose(text), None);
        self.emit(GameEvent::Died {
            cause,
            level: self.level,
        });
        log::info!("Died ({cause:?}) on level {}", self.level);
    }

    /// Resume from the checkpoint; the timer keeps its state
    pub fn restart(&mut self) {
        if !self.is_started() {
            log::debug!("Restart ignored before the run has started");
            return;
        }
        self.reset_field();
        self.level = self.checkpoint_level;
        self.score = self.checkpoint_score;
        self.phase = GamePhase::Playing;
        self.status = None;
        self.status_clear_at = None;
        self.emit(GameEvent::Restarted { level: self.level });
        log::info!("Restarted at level {}", self.level);
    }

    /// Back to level 1 with no checkpoint and a fresh timer
    pub fn full_reset(&mut self, now_ms: f64) {
        if !self.is_started() {
            log::debug!("Full reset ignored before the run has started");
            return;
        }
        self.reset_field();
        self.level = 1;
        self.score = 0;
        self.checkpoint_level = 1;
        self.checkpoint_score = 0;
        self.phase = GamePhase::Playing;
        self.status = None;
        self.status_clear_at = None;
        self.announcement = None;
        self.timer.reset();
        self.timer.start(now_ms);
        self.emit(GameEvent::FullReset);
        log::info!("Full reset");
    }

    /// Debug shortcut: jump straight to the first alligator level
    pub fn skip_to_level_three(&mut self, now_ms: f64) {
        if !self.is_running() || !self.settings.debug_shortcuts {
            return;
        }
        self.level = SKIP_TARGET_LEVEL;
        self.score = SKIP_TARGET_SCORE;
        self.checkpoint_level = SKIP_TARGET_LEVEL;
        self.checkpoint_score = SKIP_TARGET_SCORE;
        self.set_status(
            StatusMessage::win(format!("Jumped to Level {SKIP_TARGET_LEVEL}!")),
            Some(now_ms + STATUS_CLEAR_DELAY_MS),
        );
        self.reset_field();
        self.emit(GameEvent::SkippedToLevel { level: self.level });
        log::info!("Debug: jumped to level {}", self.level);
    }

    /// Handle a button press from outside the canvas
    pub fn apply_action(&mut self, action: UiAction, now_ms: f64) {
        match action {
            UiAction::Restart => self.restart(),
            UiAction::FullReset => self.full_reset(now_ms),
            UiAction::ToggleAudio => log::debug!("Audio toggle is handled by the presentation layer"),
        }
    }

    /// Clear a level-up message once its delay has passed, but only mid-run
    pub fn expire_status(&mut self, now_ms: f64) {
        let Some(clear_at) = self.status_clear_at else {
            return;
        };
        if self.is_running() && now_ms >= clear_at {
            self.status = None;
            self.status_clear_at = None;
        }
    }

    /// Drop the announcement once it has played out
    pub fn expire_announcement(&mut self, now_ms: f64) {
        if self
            .announcement
            .is_some_and(|a| a.is_finished(now_ms))
        {
            self.announcement = None;
        }
    }

    /// Record the current level and score as the restart point, per policy.
    /// Returns whether the checkpoint moved.
    fn save_checkpoint(&mut self) -> bool {
        let (level, score) = match self.settings.checkpoint_policy {
            CheckpointPolicy::ExactLevel => (self.level, self.score),
            CheckpointPolicy::PinnedAtLevelThree => {
                if self.checkpoint_level >= SKIP_TARGET_LEVEL {
                    return false;
                }
                (self.level.min(SKIP_TARGET_LEVEL), self.score)
            }
        };
        if level < self.checkpoint_level {
            return false;
        }
        self.checkpoint_level = level;
        self.checkpoint_score = score;
        true
    }

    /// Player back to the spawn point, river emptied, spawners restarted
    fn reset_field(&mut self) {
        self.player.reset_to(self.geometry.player_start());
        self.logs.clear();
        self.alligators.clear();
        self.spawn.log = 0;
        self.spawn.alligator = 0;
    }

    fn set_status(&mut self, status: StatusMessage, clear_at: Option<f64>) {
        self.status = Some(status);
        self.status_clear_at = clear_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Floater, FloaterKind, StatusStyle};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(settings: Settings) -> GameState {
        let mut state = GameState::new(settings, 3);
        state.phase = GamePhase::Title;
        state.start(0.0);
        state
    }

    fn some_log() -> Floater {
        Floater {
            kind: FloaterKind::Log,
            pos: Vec2::new(300.0, 280.0),
            size: Vec2::new(60.0, 15.0),
            speed: 1.0,
            color: 0,
        }
    }

    #[test]
    fn test_first_level_up() {
        let mut state = playing(Settings::default());
        state.logs.push(some_log());
        state.alligators.push(some_log());
        state.player.pos = Vec2::new(700.0, 100.0);
        state.spawn.log = 40;

        state.next_level(1_000.0);

        assert_eq!(state.level, 2);
        assert_eq!(state.score, 200);
        assert_eq!(state.checkpoint_level, 2);
        assert_eq!(state.checkpoint_score, 200);
        assert!(state.logs.is_empty());
        assert!(state.alligators.is_empty());
        assert_eq!(state.spawn.log, 0);
        assert_eq!(state.player.pos, Vec2::new(30.0, 240.0));
        assert_eq!(
            state.status,
            Some(StatusMessage::win("Level 2! Progress Saved!"))
        );
        assert_eq!(state.status_clear_at, Some(3_000.0));
        assert_eq!(state.announcement, Some(LevelAnnouncement::new(2, 1_000.0)));
        assert!(state.is_running());
    }

    #[test]
    fn test_status_clears_only_while_running() {
        let mut state = playing(Settings::default());
        state.next_level(0.0);
        state.expire_status(1_999.0);
        assert!(state.status.is_some());
        state.expire_status(2_000.0);
        assert!(state.status.is_none());

        // A death before the delay must not be wiped by the pending clear
        state.next_level(5_000.0);
        state.game_over(DeathCause::Drowned);
        state.expire_status(10_000.0);
        let status = state.status.clone().unwrap();
        assert_eq!(status.style, StatusStyle::Lose);
        assert_eq!(status.text, "You died! Restarting from Level 3");
    }

    #[test]
    fn test_game_over_text_without_checkpoint() {
        let mut state = playing(Settings::default());
        state.game_over(DeathCause::Alligator);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.can_restart());
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("You fell in the water! Game Over!")
        );
        assert_eq!(
            state.drain_events().last(),
            Some(&GameEvent::Died {
                cause: DeathCause::Alligator,
                level: 1
            })
        );
    }

    #[test]
    fn test_restart_resumes_checkpoint() {
        let mut state = playing(Settings::default());
        state.next_level(0.0);
        state.next_level(0.0);
        assert_eq!((state.level, state.score), (3, 500));

        state.game_over(DeathCause::Drowned);
        state.logs.push(some_log());
        state.apply_action(UiAction::Restart, 10.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.level, state.score), (3, 500));
        assert!(state.logs.is_empty());
        assert!(state.status.is_none());
    }

    #[test]
    fn test_full_reset() {
        let mut state = playing(Settings::default());
        state.next_level(0.0);
        state.game_over(DeathCause::FellOffBottom);
        state.apply_action(UiAction::FullReset, 5_000.0);

        assert_eq!((state.level, state.score), (1, 0));
        assert_eq!((state.checkpoint_level, state.checkpoint_score), (1, 0));
        assert!(state.is_running());
        assert_eq!(state.timer.elapsed_ms(6_000.0), 1_000.0);
    }

    #[test]
    fn test_level_ceiling_freezes_timer() {
        let mut state = playing(Settings::default());
        for _ in 0..8 {
            state.next_level(1_000.0);
        }
        assert_eq!(state.level, 9);
        assert!(state.is_running());

        state.next_level(83_450.0);
        assert_eq!(state.level, 10);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(!state.is_running());
        assert_eq!(state.checkpoint_level, 9);
        assert_eq!(state.timer.formatted(1e9), "1:23.45");
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("🏆 LEVEL 10 REACHED! Final Time: 1:23.45")
        );
        assert_eq!(state.status_clear_at, None);

        // Restart after winning replays from the last checkpoint; the final time stays frozen
        state.restart();
        assert_eq!(state.level, 9);
        assert_eq!(state.timer.formatted(2e9), "1:23.45");
    }

    #[test]
    fn test_skip_to_level_three() {
        let mut state = playing(Settings::default());
        state.logs.push(some_log());
        state.alligators.push(some_log());
        state.skip_to_level_three(0.0);

        assert_eq!((state.level, state.score), (3, 200));
        assert_eq!((state.checkpoint_level, state.checkpoint_score), (3, 200));
        assert!(state.logs.is_empty());
        assert!(state.alligators.is_empty());
        assert_eq!(
            state.status,
            Some(StatusMessage::win("Jumped to Level 3!"))
        );
    }

    #[test]
    fn test_skip_requires_debug_and_running() {
        let mut state = playing(Settings {
            debug_shortcuts: false,
            ..Settings::default()
        });
        state.skip_to_level_three(0.0);
        assert_eq!(state.level, 1);

        let mut state = playing(Settings::default());
        state.game_over(DeathCause::Drowned);
        state.skip_to_level_three(0.0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_pinned_checkpoint_policy() {
        let mut state = playing(Settings {
            checkpoint_policy: CheckpointPolicy::PinnedAtLevelThree,
            ..Settings::default()
        });
        state.next_level(0.0);
        assert_eq!((state.checkpoint_level, state.checkpoint_score), (2, 200));
        state.next_level(0.0);
        assert_eq!((state.checkpoint_level, state.checkpoint_score), (3, 500));
        state.next_level(0.0);
        state.next_level(0.0);
        assert_eq!(state.level, 5);
        assert_eq!((state.checkpoint_level, state.checkpoint_score), (3, 500));
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("Level 5!")
        );

        state.game_over(DeathCause::Alligator);
        state.restart();
        assert_eq!((state.level, state.score), (3, 500));
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = playing(Settings::default());
        state.drain_events();
        for level in 0..MAX_PENDING_EVENTS as u32 + 10 {
            state.emit(GameEvent::Restarted { level });
        }
        let events = state.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events[0], GameEvent::Restarted { level: 10 });
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_ignored_before_start() {
        let mut state = GameState::new(Settings::default(), 1);
        state.restart();
        state.full_reset(0.0);
        assert_eq!(state.phase, GamePhase::Loading);
        assert!(state.events.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Step {
        LevelUp,
        Die,
        Restart,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![Just(Step::LevelUp), Just(Step::Die), Just(Step::Restart)]
    }

    proptest! {
        #[test]
        fn checkpoint_never_passes_level(
            steps in prop::collection::vec(step(), 0..60),
            pinned in any::<bool>(),
        ) {
            let policy = if pinned {
                CheckpointPolicy::PinnedAtLevelThree
            } else {
                CheckpointPolicy::ExactLevel
            };
            let mut state = playing(Settings { checkpoint_policy: policy, ..Settings::default() });
            let mut last_checkpoint = state.checkpoint_level;

            for step in steps {
                match step {
                    Step::LevelUp => {
                        if state.is_running() {
                            state.next_level(0.0);
                        }
                    }
                    Step::Die => state.game_over(DeathCause::Drowned),
                    Step::Restart => {
                        state.restart();
                        prop_assert_eq!(state.level, state.checkpoint_level);
                        prop_assert_eq!(state.score, state.checkpoint_score);
                    }
                }
                prop_assert!(state.checkpoint_level <= state.level);
                prop_assert!(state.checkpoint_level >= last_checkpoint);
                prop_assert!(state.level <= MAX_LEVEL);
                last_checkpoint = state.checkpoint_level;
            }
        }
    }
}
