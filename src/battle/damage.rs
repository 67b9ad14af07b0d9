use crate::battle::state::TurnRng;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::moves::MoveData;
use crate::pokemon::PokemonInst;
use crate::type_chart;

/// Everything the engine needs to narrate one damaging hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageResult {
    pub damage: u16,
    pub effectiveness: f32,
    pub is_critical: bool,
    pub is_stab: bool,
}

impl DamageResult {
    fn no_damage(effectiveness: f32, is_stab: bool) -> Self {
        Self {
            damage: 0,
            effectiveness,
            is_critical: false,
            is_stab,
        }
    }
}

/// Calculate the damage one use of a move deals to the defender.
///
/// Draws from the oracle only for damaging, non-immune hits:
/// first a critical hit check (6% on a 1-100 roll), then the damage
/// variance roll mapped onto the 0.85..=1.00 band. Status moves and
/// immune matchups consume no rolls, so scripted tests stay compact.
pub fn calculate(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageResult {
    let is_stab = attacker.types.contains(&move_data.move_type);

    if !move_data.is_damaging() {
        return DamageResult::no_damage(1.0, is_stab);
    }

    let effectiveness = type_chart::effectiveness(move_data.move_type, &defender.types);
    if effectiveness == 0.0 {
        // Immune: exactly zero, the minimum-1 rule does not apply
        return DamageResult::no_damage(0.0, is_stab);
    }

    let is_critical = rng.next_outcome("Critical Hit Check") <= 6;
    let variance_roll = rng.next_outcome("Damage Variance");
    // Map the 1-100 roll onto 0.85..=1.00 so a max roll is exactly 1.0
    let random_factor = (85.0 + (variance_roll - 1) as f32 * 15.0 / 99.0) / 100.0;

    let level = attacker.level as f32;
    let power = move_data.power as f32;
    let attack = effective_attack(attacker, move_data) as f32;
    let defense = effective_defense(defender, move_data).max(1) as f32;

    let base_damage = ((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0;

    let mut modifier = effectiveness * random_factor;
    if is_stab {
        modifier *= 1.5;
    }
    if is_critical {
        modifier *= 2.0;
    }

    let damage = ((base_damage * modifier) as u16).max(1);

    DamageResult {
        damage,
        effectiveness,
        is_critical,
        is_stab,
    }
}
