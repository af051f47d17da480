//! Players and how the scheduler treats them

use serde::{Deserialize, Serialize};

use crate::core::types::{CivilizationId, PlayerId};

/// Who controls a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
    Barbarian,
}

/// What the scheduler does with a player this turn.
///
/// `observed` marks a computer player that is also the UI controller
/// (observer mode): its turn is played and then control is handed to
/// the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// The human at the UI; the scheduler suspends for them
    ActiveHuman,
    /// A human not at the UI (hotseat waiting, network, spectator)
    PassiveHuman,
    GenericAi { observed: bool },
    Barbarian { observed: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub civilization: CivilizationId,
    pub has_played_this_turn: bool,
    /// Skips the movement phase of turn 0
    pub sits_out_first_turn: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind, civilization: CivilizationId) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            civilization,
            has_played_this_turn: false,
            sits_out_first_turn: kind == PlayerKind::Barbarian,
        }
    }

    pub fn human(id: PlayerId, name: impl Into<String>, civilization: CivilizationId) -> Self {
        Self::new(id, name, PlayerKind::Human, civilization)
    }

    pub fn ai(id: PlayerId, name: impl Into<String>, civilization: CivilizationId) -> Self {
        Self::new(id, name, PlayerKind::Ai, civilization)
    }

    pub fn barbarians(id: PlayerId) -> Self {
        Self::new(id, "Barbarians", PlayerKind::Barbarian, CivilizationId(0))
    }

    pub fn with_sits_out_first_turn(mut self, sits_out: bool) -> Self {
        self.sits_out_first_turn = sits_out;
        self
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn is_barbarians(&self) -> bool {
        self.kind == PlayerKind::Barbarian
    }

    /// Whether the first-turn exemption applies on `turn`
    pub fn exempt_on(&self, turn: u32) -> bool {
        turn == 0 && self.sits_out_first_turn
    }

    pub fn turn_role(&self, ui_controller: Option<PlayerId>) -> TurnRole {
        let observed = ui_controller == Some(self.id);
        match self.kind {
            PlayerKind::Barbarian => TurnRole::Barbarian { observed },
            PlayerKind::Ai => TurnRole::GenericAi { observed },
            PlayerKind::Human if observed => TurnRole::ActiveHuman,
            PlayerKind::Human => TurnRole::PassiveHuman,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        let human = Player::human(PlayerId(1), "Ada", CivilizationId(1));
        let ai = Player::ai(PlayerId(2), "Rome", CivilizationId(2));
        let barbs = Player::barbarians(PlayerId(0));

        assert_eq!(human.turn_role(Some(PlayerId(1))), TurnRole::ActiveHuman);
        assert_eq!(human.turn_role(Some(PlayerId(2))), TurnRole::PassiveHuman);
        assert_eq!(human.turn_role(None), TurnRole::PassiveHuman);
        assert_eq!(ai.turn_role(Some(PlayerId(1))), TurnRole::GenericAi { observed: false });
        assert_eq!(ai.turn_role(Some(PlayerId(2))), TurnRole::GenericAi { observed: true });
        assert_eq!(barbs.turn_role(Some(PlayerId(1))), TurnRole::Barbarian { observed: false });
    }

    #[test]
    fn test_barbarians_sit_out_first_turn_by_default() {
        let barbs = Player::barbarians(PlayerId(0));
        assert!(barbs.exempt_on(0));
        assert!(!barbs.exempt_on(1));

        let ai = Player::ai(PlayerId(2), "Rome", CivilizationId(2));
        assert!(!ai.exempt_on(0));
        assert!(ai.clone().with_sits_out_first_turn(true).exempt_on(0));
    }
}
