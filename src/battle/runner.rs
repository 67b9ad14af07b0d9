use crate::battle::ai::Behavior;
use crate::battle::engine::{resolve_replacement, resolve_turn};
use crate::battle::state::{BattleEvent, BattleState, GameState, TurnRng};
use crate::player::{BattlePlayer, PlayerAction};
use std::collections::HashMap;

/// High-level battle management interface that abstracts engine complexity.
/// Provides a clean API for NPCs, humans, and scripted battles: callers
/// submit actions, the runner validates them and resolves phases as soon as
/// every required action is in.
pub struct BattleRunner {
    battle_state: BattleState,
    behaviors: [Option<Box<dyn Behavior>>; 2],
    pending_actions: HashMap<usize, PlayerAction>,
    accumulated_events: Vec<BattleEvent>,
}

/// Result of executing a battle turn or replacement
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub events: Vec<BattleEvent>,
    pub new_game_state: GameState,
    pub battle_ended: bool,
    pub winner: Option<usize>,
}

/// Errors that can occur when using the battle runner
#[derive(Debug, Clone, PartialEq)]
pub enum BattleRunnerError {
    InvalidPlayerIndex(usize),
    PlayerAlreadySubmitted(usize),
    GameNotAcceptingActions,
    InvalidActionForGameState(String),
    InvalidPlayerAction(String),
    InternalError(String),
}

impl BattleRunner {
    /// Create a new battle runner with the given players
    pub fn new(player1: BattlePlayer, player2: BattlePlayer) -> Self {
        Self {
            battle_state: BattleState::new(player1, player2),
            behaviors: [None, None],
            pending_actions: HashMap::new(),
            accumulated_events: Vec::new(),
        }
    }

    /// Attach a decision-maker for one side. Sides with a behavior get their
    /// actions filled in by `auto_execute_if_ready`.
    pub fn set_behavior(&mut self, player_index: usize, behavior: Box<dyn Behavior>) {
        if player_index < 2 {
            self.behaviors[player_index] = Some(behavior);
        }
    }

    /// Read access to the underlying battle state, for display and queries
    pub fn battle_state(&self) -> &BattleState {
        &self.battle_state
    }

    /// Check if the battle has ended
    pub fn is_battle_ended(&self) -> bool {
        self.battle_state.is_battle_over()
    }

    /// Get the winner if the battle has ended
    pub fn get_winner(&self) -> Option<usize> {
        self.battle_state.winner()
    }

    /// Submit an action for a player.
    /// Automatically executes the battle phase when all required actions are submitted.
    pub fn submit_action(
        &mut self,
        player_index: usize,
        action: PlayerAction,
    ) -> Result<Option<ExecutionResult>, BattleRunnerError> {
        if player_index >= 2 {
            return Err(BattleRunnerError::InvalidPlayerIndex(player_index));
        }

        if self.is_battle_ended() {
            return Err(BattleRunnerError::GameNotAcceptingActions);
        }

        if self.pending_actions.contains_key(&player_index) {
            return Err(BattleRunnerError::PlayerAlreadySubmitted(player_index));
        }

        // Validate that this player can submit actions in the current game state
        let can_submit = match (player_index, &self.battle_state.game_state) {
            (_, GameState::WaitingForActions) => true,
            (0, GameState::WaitingForPlayer1Replacement) => true,
            (1, GameState::WaitingForPlayer2Replacement) => true,
            _ => false,
        };

        if !can_submit {
            return Err(BattleRunnerError::InvalidActionForGameState(format!(
                "Player {} cannot submit actions in state {:?}",
                player_index, self.battle_state.game_state
            )));
        }

        // Forced replacements only accept switches
        if matches!(
            self.battle_state.game_state,
            GameState::WaitingForPlayer1Replacement | GameState::WaitingForPlayer2Replacement
        ) && !matches!(action, PlayerAction::SwitchPokemon { .. })
        {
            return Err(BattleRunnerError::InvalidActionForGameState(
                "Only switch actions allowed during forced replacement".to_string(),
            ));
        }

        self.validate_action_details(player_index, &action)?;

        self.pending_actions.insert(player_index, action);

        // Automatically execute if all required actions are now available
        if self.ready_for_execution() {
            Ok(Some(self.execute_internal()?))
        } else {
            Ok(None)
        }
    }

    /// Check which players still need to submit actions
    pub fn players_needing_actions(&self) -> Vec<usize> {
        match self.battle_state.game_state {
            GameState::WaitingForActions => (0..2)
                .filter(|i| !self.pending_actions.contains_key(i))
                .collect(),
            GameState::WaitingForPlayer1Replacement => {
                if self.pending_actions.contains_key(&0) {
                    vec![]
                } else {
                    vec![0]
                }
            }
            GameState::WaitingForPlayer2Replacement => {
                if self.pending_actions.contains_key(&1) {
                    vec![]
                } else {
                    vec![1]
                }
            }
            _ => vec![], // Battle ended or in progress
        }
    }

    /// Check if all required actions have been submitted
    pub fn ready_for_execution(&self) -> bool {
        self.players_needing_actions().is_empty()
    }

    /// Internal execution method. Resolves either a full turn or a pending
    /// replacement, depending on where the battle stands.
    fn execute_internal(&mut self) -> Result<ExecutionResult, BattleRunnerError> {
        let event_bus = match self.battle_state.game_state {
            GameState::WaitingForPlayer1Replacement | GameState::WaitingForPlayer2Replacement => {
                let player_index = if self.battle_state.game_state
                    == GameState::WaitingForPlayer1Replacement
                {
                    0
                } else {
                    1
                };
                let Some(PlayerAction::SwitchPokemon { team_index }) =
                    self.pending_actions.get(&player_index).copied()
                else {
                    return Err(BattleRunnerError::InternalError(
                        "Replacement phase without a pending switch".to_string(),
                    ));
                };
                resolve_replacement(&mut self.battle_state, player_index, team_index)
            }
            GameState::WaitingForActions => {
                for (player_index, action) in &self.pending_actions {
                    self.battle_state.action_queue[*player_index] = Some(*action);
                }
                resolve_turn(&mut self.battle_state, TurnRng::new_random())
            }
            _ => {
                return Err(BattleRunnerError::InternalError(format!(
                    "Cannot execute in state {:?}",
                    self.battle_state.game_state
                )));
            }
        };

        let events = event_bus.events().to_vec();
        self.accumulated_events.extend(events.clone());
        self.pending_actions.clear();

        Ok(ExecutionResult {
            events,
            new_game_state: self.battle_state.game_state,
            battle_ended: self.is_battle_ended(),
            winner: self.get_winner(),
        })
    }

    /// Auto-generate actions for sides with an attached behavior and execute
    /// if all actions are available. This is the loop driver for NPC battles.
    pub fn auto_execute_if_ready(&mut self) -> Result<Option<ExecutionResult>, BattleRunnerError> {
        for player_index in self.players_needing_actions() {
            let Some(behavior) = &self.behaviors[player_index] else {
                continue;
            };
            let mut rng = TurnRng::new_random();
            let action = behavior.decide_action(player_index, &self.battle_state, &mut rng);
            self.pending_actions.insert(player_index, action);
        }

        if self.ready_for_execution() && !self.is_battle_ended() {
            Ok(Some(self.execute_internal()?))
        } else {
            Ok(None)
        }
    }

    /// Get all events that have occurred in the battle so far
    pub fn get_all_events(&self) -> &[BattleEvent] {
        &self.accumulated_events
    }

    /// Get events since a certain index (for incremental updates)
    pub fn get_events_since(&self, index: usize) -> &[BattleEvent] {
        if index < self.accumulated_events.len() {
            &self.accumulated_events[index..]
        } else {
            &[]
        }
    }

    /// Clear accumulated events (useful for memory management in long battles)
    pub fn clear_event_history(&mut self) {
        self.accumulated_events.clear();
    }

    /// Get the current game state
    pub fn get_game_state(&self) -> &GameState {
        &self.battle_state.game_state
    }

    /// Get the current turn number
    pub fn get_turn_number(&self) -> u32 {
        self.battle_state.turn_number
    }

    /// Execute both player actions immediately (convenience method for testing/single-player)
    pub fn execute_single_turn(
        &mut self,
        player1_action: PlayerAction,
        player2_action: PlayerAction,
    ) -> Result<ExecutionResult, BattleRunnerError> {
        self.pending_actions.clear();

        self.submit_action(0, player1_action)?;
        let result = self.submit_action(1, player2_action)?;

        // Should auto-execute since both actions are submitted
        result.ok_or_else(|| {
            BattleRunnerError::InternalError(
                "Expected execution after submitting both actions".to_string(),
            )
        })
    }

    /// Detailed action validation
    fn validate_action_details(
        &self,
        player_index: usize,
        action: &PlayerAction,
    ) -> Result<(), BattleRunnerError> {
        let player = &self.battle_state.players[player_index];

        match action {
            PlayerAction::UseMove { move_index } => {
                let pokemon = player.active_pokemon().ok_or_else(|| {
                    BattleRunnerError::InvalidPlayerAction("No active Pokemon".to_string())
                })?;

                if *move_index >= pokemon.moves.len() {
                    return Err(BattleRunnerError::InvalidPlayerAction(
                        "Invalid move index".to_string(),
                    ));
                }

                // An exhausted move is only playable once every slot is dry;
                // the engine then resolves the action as Struggle
                if !pokemon.moves[*move_index].has_pp()
                    && !pokemon.usable_move_indices().is_empty()
                {
                    return Err(BattleRunnerError::InvalidPlayerAction(
                        "Move has no PP remaining".to_string(),
                    ));
                }
            }
            PlayerAction::SwitchPokemon { team_index } => {
                if *team_index >= player.team.len() {
                    return Err(BattleRunnerError::InvalidPlayerAction(
                        "Invalid Pokemon index".to_string(),
                    ));
                }

                if let Some(target_pokemon) = &player.team[*team_index] {
                    if target_pokemon.is_fainted() {
                        return Err(BattleRunnerError::InvalidPlayerAction(
                            "Cannot switch to fainted Pokemon".to_string(),
                        ));
                    }
                    if *team_index == player.active_pokemon_index {
                        return Err(BattleRunnerError::InvalidPlayerAction(
                            "Pokemon is already active".to_string(),
                        ));
                    }
                } else {
                    return Err(BattleRunnerError::InvalidPlayerAction(
                        "No Pokemon in that team slot".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for BattleRunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleRunnerError::InvalidPlayerIndex(idx) => {
                write!(f, "Invalid player index: {}", idx)
            }
            BattleRunnerError::PlayerAlreadySubmitted(idx) => {
                write!(f, "Player {} already submitted an action", idx)
            }
            BattleRunnerError::GameNotAcceptingActions => {
                write!(f, "Game is not currently accepting actions")
            }
            BattleRunnerError::InvalidActionForGameState(msg) => {
                write!(f, "Invalid action for current game state: {}", msg)
            }
            BattleRunnerError::InvalidPlayerAction(msg) => {
                write!(f, "Invalid player action: {}", msg)
            }
            BattleRunnerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BattleRunnerError {}
