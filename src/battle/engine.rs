use crate::battle::damage;
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, GameState, TurnRng,
};
use crate::battle::stats::{effective_speed, move_hits};
use crate::moves::MoveData;
use crate::player::PlayerAction;
use crate::pokemon::{StatusCondition, StatusType};

/// Main entry point for turn resolution.
/// Takes a battle state with both actions queued and an RNG oracle, executes
/// one complete turn, and returns the EventBus of everything that occurred.
///
/// Calling this on a battle that is not waiting for actions (ended, or
/// waiting on a replacement) returns an empty bus and changes nothing.
pub fn resolve_turn(battle_state: &mut BattleState, mut rng: TurnRng) -> EventBus {
    let mut bus = EventBus::new();

    if battle_state.game_state != GameState::WaitingForActions {
        return bus;
    }
    if battle_state.action_queue.iter().any(|slot| slot.is_none()) {
        return bus;
    }

    let (Some(action_0), Some(action_1)) = (
        battle_state.action_queue[0].take(),
        battle_state.action_queue[1].take(),
    ) else {
        return bus;
    };
    let actions = [action_0, action_1];

    battle_state.game_state = GameState::TurnInProgress;
    battle_state.turn_number += 1;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });

    // 1. Switches resolve before any move, player 1's side first
    for player_index in 0..2 {
        if let PlayerAction::SwitchPokemon { team_index } = actions[player_index] {
            execute_switch(player_index, team_index, battle_state, &mut bus);
        }
    }

    // 2. Moves in speed order, once the incoming switches are on the field
    let order = determine_action_order(battle_state, &mut rng);

    for &player_index in &order {
        let PlayerAction::UseMove { move_index } = actions[player_index] else {
            continue;
        };

        execute_attack(player_index, move_index, battle_state, &mut bus, &mut rng);

        // A faint interrupts the rest of the turn
        if check_for_faint(1 - player_index, battle_state, &mut bus) {
            return bus;
        }
    }

    // 3. End-of-turn status residuals, in the same order the actors moved
    for &player_index in &order {
        if tick_end_of_turn_status(player_index, battle_state, &mut bus) {
            return bus;
        }
    }

    bus.push(BattleEvent::TurnEnded);
    battle_state.game_state = GameState::WaitingForActions;
    bus
}

/// Resolve a forced replacement after a faint. This is an inter-turn action:
/// no turn number advances and the opponent does not get to act.
pub fn resolve_replacement(
    battle_state: &mut BattleState,
    player_index: usize,
    team_index: usize,
) -> EventBus {
    let mut bus = EventBus::new();

    let expected = if player_index == 0 {
        GameState::WaitingForPlayer1Replacement
    } else {
        GameState::WaitingForPlayer2Replacement
    };
    if battle_state.game_state != expected {
        return bus;
    }

    let player = &mut battle_state.players[player_index];
    if player.switch_pokemon(team_index).is_err() {
        return bus;
    }
    let incoming = match player.active_pokemon() {
        Some(pokemon) => pokemon.name.clone(),
        None => return bus,
    };

    bus.push(BattleEvent::PokemonSentOut {
        player_index,
        pokemon: incoming,
    });
    battle_state.game_state = GameState::WaitingForActions;

    bus
}

/// Execute a voluntary switch. The outgoing Pokemon is recalled first, so the
/// events read as a pair.
fn execute_switch(
    player_index: usize,
    team_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
) {
    let player = &mut battle_state.players[player_index];
    let outgoing = match player.active_pokemon() {
        Some(pokemon) => pokemon.name.clone(),
        None => return,
    };
    if player.switch_pokemon(team_index).is_err() {
        return;
    }
    let incoming = match player.active_pokemon() {
        Some(pokemon) => pokemon.name.clone(),
        None => return,
    };

    bus.push(BattleEvent::PokemonRecalled {
        player_index,
        pokemon: outgoing,
    });
    bus.push(BattleEvent::PokemonSentOut {
        player_index,
        pokemon: incoming,
    });
}

/// Decide which side acts first this turn. Higher effective speed wins;
/// a tie is settled by a coin flip from the oracle.
fn determine_action_order(battle_state: &BattleState, rng: &mut TurnRng) -> [usize; 2] {
    let speed_0 = battle_state.players[0]
        .active_pokemon()
        .map(effective_speed)
        .unwrap_or(0);
    let speed_1 = battle_state.players[1]
        .active_pokemon()
        .map(effective_speed)
        .unwrap_or(0);

    if speed_0 > speed_1 {
        [0, 1]
    } else if speed_1 > speed_0 {
        [1, 0]
    } else if rng.next_outcome("Speed Tie Check") <= 50 {
        [0, 1]
    } else {
        [1, 0]
    }
}

/// Execute one use of a move: status gate, PP, accuracy, damage, ailment.
fn execute_attack(
    attacker_index: usize,
    move_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    let defender_index = 1 - attacker_index;

    let attacker_name = {
        let Some(attacker) = battle_state.players[attacker_index].active_pokemon() else {
            return;
        };
        if attacker.is_fainted() {
            return;
        }
        attacker.name.clone()
    };

    // Sleep, freeze and paralysis can stop the move before it starts
    if let Some(reason) =
        check_action_preventing_conditions(attacker_index, battle_state, rng, bus)
    {
        bus.push(BattleEvent::ActionFailed {
            target: attacker_name,
            reason,
        });
        return;
    }

    // Resolve the move from the chosen slot. An empty slot or an exhausted
    // one falls back to Struggle, which costs no PP.
    let (move_data, spends_pp) = {
        let Some(attacker) = battle_state.players[attacker_index].active_pokemon() else {
            return;
        };
        match attacker.moves.get(move_index) {
            Some(instance) if instance.has_pp() => (instance.data.clone(), true),
            _ => (MoveData::struggle(), false),
        }
    };

    bus.push(BattleEvent::MoveUsed {
        player_index: attacker_index,
        pokemon: attacker_name.clone(),
        move_name: move_data.display_name(),
    });

    if spends_pp {
        if let Some(attacker) = battle_state.players[attacker_index].active_pokemon_mut() {
            attacker.moves[move_index].use_move();
        }
    }

    // PP is spent whether or not the move lands
    if !move_hits(&move_data, rng) {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_name,
        });
        return;
    }

    let mut effectiveness = 1.0;
    if move_data.is_damaging() {
        let result = {
            let attacker = &battle_state.players[attacker_index];
            let defender = &battle_state.players[defender_index];
            let (Some(attacker), Some(defender)) =
                (attacker.active_pokemon(), defender.active_pokemon())
            else {
                return;
            };
            damage::calculate(attacker, defender, &move_data, rng)
        };
        effectiveness = result.effectiveness;

        if result.effectiveness == 0.0 {
            bus.push(BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 });
            return;
        }

        let (target_name, remaining_hp) = {
            let Some(defender) = battle_state.players[defender_index].active_pokemon_mut() else {
                return;
            };
            defender.take_damage(result.damage);
            (defender.name.clone(), defender.current_hp)
        };

        bus.push(BattleEvent::DamageDealt {
            target: target_name,
            damage: result.damage,
            remaining_hp,
        });
        bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: result.effectiveness,
        });
        if result.is_critical {
            bus.push(BattleEvent::CriticalHit {
                attacker: attacker_name,
            });
        }
    }

    if let Some(status_type) = move_data.ailment {
        if effectiveness > 0.0 {
            try_apply_ailment(
                defender_index,
                status_type,
                &move_data,
                battle_state,
                bus,
                rng,
            );
        }
    }
}

/// Roll for and apply a move's ailment to the defender.
///
/// A move with an ailment chance rolls against it. A pure status move with
/// no listed chance always inflicts its ailment (that is the whole move).
fn try_apply_ailment(
    defender_index: usize,
    status_type: StatusType,
    move_data: &MoveData,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    let should_apply = if move_data.ailment_chance > 0 {
        let roll = rng.next_outcome("Status Ailment Check");
        roll <= move_data.ailment_chance
    } else {
        !move_data.is_damaging()
    };
    if !should_apply {
        return;
    }

    let Some(defender) = battle_state.players[defender_index].active_pokemon_mut() else {
        return;
    };
    if defender.is_fainted() {
        return;
    }

    if defender.has_status() {
        bus.push(BattleEvent::StatusApplicationFailed {
            target: defender.name.clone(),
        });
        return;
    }

    let sleep_turns = if status_type == StatusType::Sleep {
        (rng.next_outcome("Generate Sleep Duration") % 3) + 1
    } else {
        0
    };
    let condition = StatusCondition::from_type(status_type, sleep_turns);

    defender.apply_status(condition);
    bus.push(BattleEvent::PokemonStatusApplied {
        target: defender.name.clone(),
        status: condition,
    });
}

/// Check all action-preventing conditions (sleep, freeze, paralysis).
/// Returns Some(reason) if the Pokemon cannot act this turn. Self-curing
/// conditions (waking, thawing) are resolved and announced here.
fn check_action_preventing_conditions(
    player_index: usize,
    battle_state: &mut BattleState,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<ActionFailureReason> {
    let pokemon = battle_state.players[player_index].active_pokemon_mut()?;

    match pokemon.status {
        Some(StatusCondition::Sleep(turns_remaining)) => {
            if turns_remaining == 0 {
                let target = pokemon.name.clone();
                pokemon.clear_status();
                bus.push(BattleEvent::PokemonStatusRemoved {
                    target,
                    status: StatusCondition::Sleep(0),
                });
                None
            } else {
                pokemon.status = Some(StatusCondition::Sleep(turns_remaining - 1));
                Some(ActionFailureReason::IsAsleep)
            }
        }
        Some(StatusCondition::Freeze) => {
            // 20% chance to thaw each turn
            let thaw_roll = rng.next_outcome("Defrost Check");
            if thaw_roll <= 20 {
                let target = pokemon.name.clone();
                pokemon.clear_status();
                bus.push(BattleEvent::PokemonStatusRemoved {
                    target,
                    status: StatusCondition::Freeze,
                });
                None
            } else {
                Some(ActionFailureReason::IsFrozen)
            }
        }
        Some(StatusCondition::Paralysis) => {
            // 25% chance of full paralysis
            let paralysis_roll = rng.next_outcome("Immobilized by Paralysis Check");
            if paralysis_roll <= 25 {
                Some(ActionFailureReason::IsParalyzed)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Apply end-of-turn burn or poison damage to one side's active Pokemon.
/// Returns true if the resulting faint ended the turn.
fn tick_end_of_turn_status(
    player_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
) -> bool {
    let tick = {
        let Some(pokemon) = battle_state.players[player_index].active_pokemon_mut() else {
            return false;
        };
        // Fainted Pokemon do not take end-of-turn damage
        if pokemon.is_fainted() {
            return false;
        }
        let Some(status) = pokemon.status else {
            return false;
        };
        let damage = status.end_of_turn_damage(pokemon.max_hp());
        if damage == 0 {
            return false;
        }
        pokemon.take_damage(damage);
        BattleEvent::PokemonStatusDamage {
            target: pokemon.name.clone(),
            status,
            damage,
            remaining_hp: pokemon.current_hp,
        }
    };
    bus.push(tick);

    check_for_faint(player_index, battle_state, bus)
}

/// Announce a faint on the given side and move the battle to the state it
/// implies: a replacement prompt if the side can still fight, otherwise the
/// opponent's win. Returns true if the active Pokemon had fainted.
fn check_for_faint(player_index: usize, battle_state: &mut BattleState, bus: &mut EventBus) -> bool {
    let fainted_name = {
        let player = &battle_state.players[player_index];
        let Some(pokemon) = player.active_pokemon() else {
            return false;
        };
        if !pokemon.is_fainted() {
            return false;
        }
        pokemon.name.clone()
    };

    bus.push(BattleEvent::PokemonFainted {
        player_index,
        pokemon: fainted_name,
    });

    if battle_state.players[player_index].has_alive_pokemon() {
        battle_state.game_state = if player_index == 0 {
            GameState::WaitingForPlayer1Replacement
        } else {
            GameState::WaitingForPlayer2Replacement
        };
        bus.push(BattleEvent::ReplacementRequired { player_index });
    } else {
        let winner = 1 - player_index;
        battle_state.game_state = if winner == 0 {
            GameState::Player1Win
        } else {
            GameState::Player2Win
        };
        bus.push(BattleEvent::BattleEnded { winner });
    }

    true
}
