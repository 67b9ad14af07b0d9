use crate::errors::ActionError;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    // The index refers to the move's position (0-3) in the active Pokemon's move list.
    UseMove { move_index: usize },

    // The index refers to the Pokemon's position (0-5) in the player's team.
    SwitchPokemon { team_index: usize },
}

/// Whether a side is driven by a human or by the scoring AI
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Npc,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattlePlayer {
    pub player_name: String,

    // The player's full team of up to 6 Pokemon instances.
    pub team: [Option<PokemonInst>; 6],

    // The index (0-5) of the Pokemon in `team` that is currently active.
    pub active_pokemon_index: usize,

    pub kind: PlayerKind,
}

impl BattlePlayer {
    /// Create a new BattlePlayer. At most 6 team members are kept.
    pub fn new(player_name: String, team: Vec<PokemonInst>, kind: PlayerKind) -> Self {
        let mut team_array = [const { None }; 6];
        for (i, pokemon) in team.into_iter().take(6).enumerate() {
            team_array[i] = Some(pokemon);
        }

        BattlePlayer {
            player_name,
            team: team_array,
            active_pokemon_index: 0,
            kind,
        }
    }

    /// Get the currently active Pokemon
    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team
            .get(self.active_pokemon_index)
            .and_then(|slot| slot.as_ref())
    }

    /// Get the currently active Pokemon mutably
    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team
            .get_mut(self.active_pokemon_index)
            .and_then(|slot| slot.as_mut())
    }

    /// Switch the active Pokemon. The target must exist, be conscious, and
    /// not already be active.
    pub fn switch_pokemon(&mut self, new_index: usize) -> Result<(), ActionError> {
        let target = self
            .team
            .get(new_index)
            .and_then(|slot| slot.as_ref())
            .ok_or(ActionError::InvalidPokemonIndex(new_index))?;

        if target.is_fainted() {
            return Err(ActionError::InvalidAction(
                "Cannot switch to a fainted Pokemon".to_string(),
            ));
        }
        if new_index == self.active_pokemon_index {
            return Err(ActionError::InvalidAction(
                "Pokemon is already active".to_string(),
            ));
        }

        self.active_pokemon_index = new_index;
        Ok(())
    }

    /// True if any team member is still conscious
    pub fn has_alive_pokemon(&self) -> bool {
        self.team
            .iter()
            .flatten()
            .any(|pokemon| !pokemon.is_fainted())
    }

    /// Indices of team members that could be switched in: conscious and not
    /// currently active
    pub fn switchable_indices(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(index, slot)| {
                *index != self.active_pokemon_index
                    && slot.as_ref().is_some_and(|pokemon| !pokemon.is_fainted())
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Fully restore the whole team: HP, status conditions, and PP
    pub fn heal_all(&mut self) {
        for pokemon in self.team.iter_mut().flatten() {
            pokemon.heal_fully();
        }
    }
}
