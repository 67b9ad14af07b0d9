//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::{BattleState, GameState, TurnRng};
use crate::moves::MoveData;
use crate::player::PlayerAction;
use crate::pokemon::{PokemonInst, StatusType};
use crate::type_chart;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// How strongly the AI plays its scored options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given player.
    /// Draws from the oracle where the strategy is probabilistic.
    fn decide_action(
        &self,
        player_index: usize,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> PlayerAction;
}

pub struct ScoringAI {
    difficulty: Difficulty,
}

impl ScoringAI {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The core scoring logic. Assigns a floating-point value to one move.
    fn score_move(&self, move_data: &MoveData, attacker: &PokemonInst, defender: &PokemonInst) -> f32 {
        if move_data.is_damaging() {
            let effectiveness = type_chart::effectiveness(move_data.move_type, &defender.types);
            let stab_multiplier = if attacker.types.contains(&move_data.move_type) {
                1.5
            } else {
                1.0
            };

            let mut score = move_data.power as f32 * effectiveness * stab_multiplier;

            // Hard leans harder into super effective coverage. An immune
            // matchup already scored itself to zero through the multiplier.
            if self.difficulty == Difficulty::Hard && effectiveness >= 2.0 {
                score *= 1.2;
            }
            score
        } else {
            self.score_status_move(move_data, attacker, defender)
        }
    }

    /// Status moves score a flat baseline below average attacks, except on
    /// Hard, which weighs what the ailment actually does to this opponent.
    fn score_status_move(
        &self,
        move_data: &MoveData,
        attacker: &PokemonInst,
        defender: &PokemonInst,
    ) -> f32 {
        if self.difficulty != Difficulty::Hard {
            return 20.0;
        }

        let Some(status_type) = move_data.ailment else {
            return 5.0;
        };
        // A second status never lands, so the move would be wasted
        if defender.has_status() {
            return 5.0;
        }

        match status_type {
            StatusType::Paralysis => {
                if defender.stats.speed > attacker.stats.speed {
                    60.0
                } else {
                    35.0
                }
            }
            StatusType::Burn => {
                if defender.stats.attack > defender.stats.sp_attack {
                    55.0
                } else {
                    30.0
                }
            }
            StatusType::Sleep | StatusType::Freeze => 65.0,
            StatusType::Poison => 40.0,
        }
    }

    /// Pick among the usable moves with the tier's discipline: Hard always
    /// takes the top score, Normal takes it 70% of the time, Easy 40%.
    /// Otherwise the pick is uniform across the remaining usable moves.
    fn pick_scored_move(
        &self,
        scored: &[(usize, f32)],
        rng: &mut TurnRng,
    ) -> usize {
        let top = scored
            .iter()
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(index, _)| *index)
            .unwrap_or(0);

        if scored.len() < 2 {
            return top;
        }

        let top_chance = match self.difficulty {
            Difficulty::Easy => 40,
            Difficulty::Normal => 70,
            Difficulty::Hard => return top,
        };

        if rng.next_outcome("Move Selection Check") <= top_chance {
            return top;
        }

        let others: Vec<usize> = scored
            .iter()
            .map(|(index, _)| *index)
            .filter(|index| *index != top)
            .collect();
        let pick = rng.next_outcome("Fallback Move Selection") as usize % others.len();
        others[pick]
    }

    /// How favorably `candidate` lines up against the opposing active Pokemon.
    /// Combines its best offensive type multiplier with the inverse of the
    /// worst it can be hit for. An immune defensive matchup doubles the score.
    fn matchup_score(&self, candidate: &PokemonInst, opponent: &PokemonInst) -> f32 {
        let offensive = candidate
            .types
            .iter()
            .map(|t| type_chart::effectiveness(*t, &opponent.types))
            .fold(0.0, f32::max);

        let defensive = opponent
            .types
            .iter()
            .map(|t| type_chart::effectiveness(*t, &candidate.types))
            .fold(0.0, f32::max);

        let defensive_factor = if defensive == 0.0 {
            2.0
        } else {
            1.0 / defensive
        };

        offensive * defensive_factor
    }

    /// Hard's mid-battle switch instinct. Returns a bench index worth
    /// switching to, or None to stay in and fight.
    fn consider_switch(
        &self,
        player_index: usize,
        battle_state: &BattleState,
    ) -> Option<usize> {
        let player = &battle_state.players[player_index];
        let opponent = &battle_state.players[1 - player_index];
        let active = player.active_pokemon()?;
        let defender = opponent.active_pokemon()?;

        // Too hurt to spend a turn on positioning
        if active.hp_fraction() < 0.25 {
            return None;
        }

        let current = self.matchup_score(active, defender);
        if current >= 1.0 {
            return None;
        }

        let mut best: Option<(usize, f32)> = None;
        for index in player.switchable_indices() {
            let Some(candidate) = player.team[index].as_ref() else {
                continue;
            };
            let score = self.matchup_score(candidate, defender);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        if score >= 1.5 && score > current + 0.5 {
            Some(index)
        } else {
            None
        }
    }

    /// Pick the replacement after a faint. Easy sends whoever, the other
    /// tiers weigh the type matchup, and Hard also prefers healthier benchers.
    fn choose_replacement(
        &self,
        player_index: usize,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> PlayerAction {
        let player = &battle_state.players[player_index];
        let opponent = &battle_state.players[1 - player_index];
        let candidates = player.switchable_indices();

        if candidates.is_empty() {
            // The engine has already ruled this side has a Pokemon left
            return PlayerAction::SwitchPokemon { team_index: 0 };
        }

        if self.difficulty == Difficulty::Easy {
            let pick = rng.next_outcome("Random Replacement Pick") as usize % candidates.len();
            return PlayerAction::SwitchPokemon {
                team_index: candidates[pick],
            };
        }

        let Some(defender) = opponent.active_pokemon() else {
            return PlayerAction::SwitchPokemon {
                team_index: candidates[0],
            };
        };

        let best = candidates
            .into_iter()
            .max_by_key(|&index| {
                let Some(candidate) = player.team[index].as_ref() else {
                    return OrderedFloat(f32::MIN);
                };
                let mut score = self.matchup_score(candidate, defender);
                if self.difficulty == Difficulty::Hard {
                    score += candidate.hp_fraction() * 0.3;
                }
                OrderedFloat(score)
            })
            .unwrap_or(0);

        PlayerAction::SwitchPokemon { team_index: best }
    }
}

impl Behavior for ScoringAI {
    fn decide_action(
        &self,
        player_index: usize,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> PlayerAction {
        // --- Phase 1: Handle Forced Replacements ---
        let is_replacement_phase = match battle_state.game_state {
            GameState::WaitingForPlayer1Replacement => player_index == 0,
            GameState::WaitingForPlayer2Replacement => player_index == 1,
            _ => false,
        };
        if is_replacement_phase {
            return self.choose_replacement(player_index, battle_state, rng);
        }

        // --- Phase 2: Consider a Voluntary Switch (Hard only) ---
        if self.difficulty == Difficulty::Hard {
            if let Some(team_index) = self.consider_switch(player_index, battle_state) {
                // Even a good switch is only taken most of the time, so the
                // AI cannot be farmed by forcing endless pivots
                if rng.next_outcome("Switch Consideration") <= 70 {
                    return PlayerAction::SwitchPokemon { team_index };
                }
            }
        }

        // --- Phase 3: Score the Usable Moves ---
        let player = &battle_state.players[player_index];
        let opponent = &battle_state.players[1 - player_index];
        let (Some(attacker), Some(defender)) =
            (player.active_pokemon(), opponent.active_pokemon())
        else {
            return PlayerAction::UseMove { move_index: 0 };
        };

        let usable = attacker.usable_move_indices();
        if usable.is_empty() {
            // Out of PP everywhere: the engine resolves this as Struggle
            return PlayerAction::UseMove { move_index: 0 };
        }

        let scored: Vec<(usize, f32)> = usable
            .into_iter()
            .map(|index| {
                let score = self.score_move(&attacker.moves[index].data, attacker, defender);
                (index, score)
            })
            .collect();

        PlayerAction::UseMove {
            move_index: self.pick_scored_move(&scored, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveCategory;
    use crate::pokemon::{BaseStats, PokemonType};

    fn make_move(
        name: &str,
        move_type: PokemonType,
        category: MoveCategory,
        power: u8,
        ailment: Option<StatusType>,
    ) -> MoveData {
        MoveData {
            name: name.to_string(),
            move_type,
            category,
            power,
            accuracy: 100,
            max_pp: 20,
            ailment,
            ailment_chance: 0,
        }
    }

    fn make_pokemon(name: &str, types: Vec<PokemonType>, base: BaseStats) -> PokemonInst {
        PokemonInst::new(1, name.to_string(), 50, types, &base, vec![])
    }

    fn even_stats() -> BaseStats {
        BaseStats {
            hp: 60,
            attack: 60,
            defense: 60,
            sp_attack: 60,
            sp_defense: 60,
            speed: 60,
        }
    }

    #[test]
    fn test_damaging_move_score_multiplies_power_effectiveness_and_stab() {
        let ai = ScoringAI::new(Difficulty::Normal);
        let attacker = make_pokemon("Squirtle", vec![PokemonType::Water], even_stats());
        let defender = make_pokemon("Charmander", vec![PokemonType::Fire], even_stats());

        let water_gun = make_move("water-gun", PokemonType::Water, MoveCategory::Special, 40, None);
        // 40 power * 2.0 effectiveness * 1.5 STAB
        assert_eq!(ai.score_move(&water_gun, &attacker, &defender), 120.0);

        let tackle = make_move("tackle", PokemonType::Normal, MoveCategory::Physical, 40, None);
        assert_eq!(ai.score_move(&tackle, &attacker, &defender), 40.0);
    }

    #[test]
    fn test_immune_moves_score_zero() {
        let ai = ScoringAI::new(Difficulty::Hard);
        let attacker = make_pokemon("Rattata", vec![PokemonType::Normal], even_stats());
        let defender = make_pokemon("Gastly", vec![PokemonType::Ghost], even_stats());

        let tackle = make_move("tackle", PokemonType::Normal, MoveCategory::Physical, 40, None);
        assert_eq!(ai.score_move(&tackle, &attacker, &defender), 0.0);
    }

    #[test]
    fn test_hard_boosts_super_effective_moves() {
        let easy = ScoringAI::new(Difficulty::Easy);
        let hard = ScoringAI::new(Difficulty::Hard);
        let attacker = make_pokemon("Squirtle", vec![PokemonType::Water], even_stats());
        let defender = make_pokemon("Charmander", vec![PokemonType::Fire], even_stats());
        let water_gun = make_move("water-gun", PokemonType::Water, MoveCategory::Special, 40, None);

        assert_eq!(easy.score_move(&water_gun, &attacker, &defender), 120.0);
        // Hard multiplies the 120 by 1.2 for landing at 2x or better
        assert_eq!(hard.score_move(&water_gun, &attacker, &defender), 144.0);
    }

    #[test]
    fn test_status_scoring_flat_below_hard() {
        let ai = ScoringAI::new(Difficulty::Normal);
        let attacker = make_pokemon("Pikachu", vec![PokemonType::Electric], even_stats());
        let defender = make_pokemon("Onix", vec![PokemonType::Rock], even_stats());

        let thunder_wave = make_move(
            "thunder-wave",
            PokemonType::Electric,
            MoveCategory::Status,
            0,
            Some(StatusType::Paralysis),
        );
        assert_eq!(ai.score_move(&thunder_wave, &attacker, &defender), 20.0);
    }

    #[test]
    fn test_hard_status_scoring_reads_the_matchup() {
        let ai = ScoringAI::new(Difficulty::Hard);
        let slow_base = BaseStats {
            speed: 30,
            ..even_stats()
        };
        let fast_base = BaseStats {
            speed: 90,
            ..even_stats()
        };

        let attacker = make_pokemon("Slowpoke", vec![PokemonType::Water], slow_base);
        let fast_defender = make_pokemon("Pidgey", vec![PokemonType::Normal], fast_base);
        let slow_defender = make_pokemon("Snorlax", vec![PokemonType::Normal], slow_base);

        let thunder_wave = make_move(
            "thunder-wave",
            PokemonType::Electric,
            MoveCategory::Status,
            0,
            Some(StatusType::Paralysis),
        );

        // Paralysis is worth more against something faster than us
        assert_eq!(ai.score_move(&thunder_wave, &attacker, &fast_defender), 60.0);
        assert_eq!(ai.score_move(&thunder_wave, &attacker, &slow_defender), 35.0);

        let hypnosis = make_move(
            "hypnosis",
            PokemonType::Psychic,
            MoveCategory::Status,
            0,
            Some(StatusType::Sleep),
        );
        assert_eq!(ai.score_move(&hypnosis, &attacker, &fast_defender), 65.0);

        // Against an already-statused target the move is nearly worthless
        let mut statused = make_pokemon("Pidgey", vec![PokemonType::Normal], fast_base);
        assert!(statused.apply_status(crate::pokemon::StatusCondition::Poison));
        assert_eq!(ai.score_move(&thunder_wave, &attacker, &statused), 5.0);
    }

    #[test]
    fn test_hard_always_takes_the_top_scored_move() {
        let ai = ScoringAI::new(Difficulty::Hard);
        let scored = vec![(0, 40.0), (1, 120.0), (2, 20.0)];

        // No oracle draws happen: an empty oracle proves determinism
        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(ai.pick_scored_move(&scored, &mut rng), 1);
    }

    #[test]
    fn test_easy_takes_top_move_on_a_low_roll_and_dodges_it_on_a_high_one() {
        let ai = ScoringAI::new(Difficulty::Easy);
        let scored = vec![(0, 40.0), (1, 120.0), (2, 20.0)];

        let mut rng = TurnRng::new_for_test(vec![40]);
        assert_eq!(ai.pick_scored_move(&scored, &mut rng), 1);

        // 41 fails the 40% check; the follow-up roll picks among the others
        let mut rng = TurnRng::new_for_test(vec![41, 2]);
        let pick = ai.pick_scored_move(&scored, &mut rng);
        assert_ne!(pick, 1);
    }

    #[test]
    fn test_single_usable_move_skips_the_oracle() {
        let ai = ScoringAI::new(Difficulty::Easy);
        let scored = vec![(3, 55.0)];

        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(ai.pick_scored_move(&scored, &mut rng), 3);
    }

    #[test]
    fn test_matchup_score_rewards_offense_and_resistance() {
        let ai = ScoringAI::new(Difficulty::Hard);
        let water = make_pokemon("Squirtle", vec![PokemonType::Water], even_stats());
        let fire = make_pokemon("Charmander", vec![PokemonType::Fire], even_stats());

        // Water hits fire for 2x and resists fire at 0.5x: 2.0 * (1/0.5)
        assert_eq!(ai.matchup_score(&water, &fire), 4.0);
        // The reverse matchup: 0.5 * (1/2.0)
        assert_eq!(ai.matchup_score(&fire, &water), 0.25);
    }

    #[test]
    fn test_matchup_score_doubles_on_defensive_immunity() {
        let ai = ScoringAI::new(Difficulty::Hard);
        let ghost = make_pokemon("Gastly", vec![PokemonType::Ghost], even_stats());
        let normal = make_pokemon("Rattata", vec![PokemonType::Normal], even_stats());

        // Ghost hits normal for 0x but takes 0x back: 0.0 * 2.0 is still 0
        assert_eq!(ai.matchup_score(&ghost, &normal), 0.0);
        // Flipped: normal cannot touch ghost, ghost-on-normal offense is 0
        assert_eq!(ai.matchup_score(&normal, &ghost), 0.0);

        // Ground vs electric: 2x offense, immune to the return electric hits
        let ground = make_pokemon("Diglett", vec![PokemonType::Ground], even_stats());
        let electric = make_pokemon("Pikachu", vec![PokemonType::Electric], even_stats());
        assert_eq!(ai.matchup_score(&ground, &electric), 4.0);
    }
}
