//! Phase controller: Werera, normal play and termination
//!
//! ```text
//!            first capture (turn → non-capturer)
//! Werera ───────────────────────────────────────▶ Normal ──┐
//!   │                                              │  ▲     │ every move
//!   │                                              │  └─────┘ (turn → opponent of mover)
//!   └──────────────▶ Complete(reason) ◀────────────┘
//!       evaluator result or resignation/timeout
//! ```
//!
//! Senterej sessions open in Werera, where both players move freely and the
//! controller never rejects on turn. Standard sessions start in Normal.
//! `Complete` is absorbing.

use crate::error::{EngineError, EngineResult};
use crate::rules::{TerminalEvent, TerminalReason};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Simultaneous opening; ends at the first capture
    Werera,
    /// Alternating turns
    Normal,
    /// Game over
    Complete(TerminalReason),
}

impl Phase {
    /// Phase a fresh game of `variant` starts in
    pub fn initial(variant: Variant) -> Phase {
        if variant.has_werera() {
            Phase::Werera
        } else {
            Phase::Normal
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Phase::Complete(_))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Werera => f.write_str("werera"),
            Phase::Normal => f.write_str("normal"),
            Phase::Complete(reason) => write!(f, "complete({reason})"),
        }
    }
}

/// Tracks phase, whose turn it is and the terminal event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseController {
    phase: Phase,
    current_turn: Player,
    outcome: Option<TerminalEvent>,
}

impl PhaseController {
    /// Controller for a new game of `variant`, White to move
    pub fn new(variant: Variant) -> Self {
        Self::resume(Phase::initial(variant), Player::White)
    }

    /// Controller starting from an arbitrary non-terminal phase
    pub fn resume(phase: Phase, current_turn: Player) -> Self {
        Self {
            phase,
            current_turn,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn outcome(&self) -> Option<TerminalEvent> {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    /// Gate a submission by `player` before it reaches the log
    ///
    /// # Errors
    ///
    /// - [`EngineError::SessionComplete`] once the game is over
    /// - [`EngineError::NotYourTurn`] in Normal phase when `player` is not to move
    pub fn check_submission(&self, player: Player) -> EngineResult<()> {
        match self.phase {
            Phase::Complete(reason) => Err(EngineError::SessionComplete { reason }),
            Phase::Werera => Ok(()),
            Phase::Normal if player != self.current_turn => {
                Err(EngineError::NotYourTurn { player })
            }
            Phase::Normal => Ok(()),
        }
    }

    /// Record an applied move
    ///
    /// In both live phases the turn passes to the opponent of the mover. A
    /// capture during Werera ends the opening, which hands the first real turn
    /// to the player who did not capture.
    pub fn record_move(&mut self, mover: Player, captured: bool) {
        match self.phase {
            Phase::Werera => {
                self.current_turn = mover.opponent();
                if captured {
                    self.phase = Phase::Normal;
                    info!(
                        "[PHASE] Werera ended by {} capture, {} moves first",
                        mover, self.current_turn
                    );
                }
            }
            Phase::Normal => {
                self.current_turn = mover.opponent();
                debug!("[PHASE] Turn passes to {}", self.current_turn);
            }
            Phase::Complete(reason) => {
                warn!(
                    "[PHASE] Ignoring move by {} after game ended ({})",
                    mover, reason
                );
            }
        }
    }

    /// Move to `Complete`; a second terminal event is ignored
    pub fn finish(&mut self, event: TerminalEvent) {
        if let Phase::Complete(existing) = self.phase {
            warn!(
                "[PHASE] Game already complete ({}), ignoring {}",
                existing, event.reason
            );
            return;
        }
        info!("[PHASE] Game complete: {}", event.message());
        self.phase = Phase::Complete(event.reason);
        self.outcome = Some(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_per_variant() {
        assert_eq!(PhaseController::new(Variant::Senterej).phase(), Phase::Werera);
        assert_eq!(PhaseController::new(Variant::Standard).phase(), Phase::Normal);
        assert_eq!(PhaseController::new(Variant::Standard).current_turn(), Player::White);
    }

    #[test]
    fn test_werera_accepts_both_players() {
        let mut ctl = PhaseController::new(Variant::Senterej);
        assert!(ctl.check_submission(Player::White).is_ok());
        assert!(ctl.check_submission(Player::Black).is_ok());

        ctl.record_move(Player::White, false);
        ctl.record_move(Player::White, false);
        assert_eq!(ctl.phase(), Phase::Werera);
        assert!(ctl.check_submission(Player::White).is_ok());
    }

    #[test]
    fn test_werera_capture_hands_turn_to_non_capturer() {
        let mut ctl = PhaseController::new(Variant::Senterej);
        ctl.record_move(Player::Black, false);
        ctl.record_move(Player::White, true);

        assert_eq!(ctl.phase(), Phase::Normal);
        assert_eq!(ctl.current_turn(), Player::Black);

        let mut ctl = PhaseController::new(Variant::Senterej);
        ctl.record_move(Player::Black, true);
        assert_eq!(ctl.current_turn(), Player::White);
    }

    #[test]
    fn test_normal_phase_alternates_and_gates() {
        let mut ctl = PhaseController::new(Variant::Standard);
        assert!(matches!(
            ctl.check_submission(Player::Black),
            Err(EngineError::NotYourTurn { player: Player::Black })
        ));

        ctl.record_move(Player::White, false);
        assert_eq!(ctl.current_turn(), Player::Black);
        assert!(ctl.check_submission(Player::Black).is_ok());
        assert!(ctl.check_submission(Player::White).is_err());

        ctl.record_move(Player::Black, true);
        assert_eq!(ctl.current_turn(), Player::White);
        assert_eq!(ctl.phase(), Phase::Normal);
    }

    #[test]
    fn test_complete_is_absorbing() {
        let mut ctl = PhaseController::new(Variant::Senterej);
        ctl.finish(TerminalEvent::resignation(Player::Black));
        assert_eq!(ctl.phase(), Phase::Complete(TerminalReason::Resignation));

        ctl.finish(TerminalEvent::timeout(Player::White));
        ctl.record_move(Player::White, true);
        assert_eq!(ctl.phase(), Phase::Complete(TerminalReason::Resignation));
        assert_eq!(ctl.outcome().and_then(|e| e.winner), Some(Player::White));
        assert!(matches!(
            ctl.check_submission(Player::White),
            Err(EngineError::SessionComplete { reason: TerminalReason::Resignation })
        ));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Werera.to_string(), "werera");
        assert_eq!(
            Phase::Complete(TerminalReason::BareKing).to_string(),
            "complete(bare-king)"
        );
    }
}
