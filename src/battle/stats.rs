use crate::battle::state::TurnRng;
use crate::moves::{MoveCategory, MoveData};
use crate::pokemon::{PokemonInst, StatusCondition};

/// Calculate the attack stat a move actually hits with, including condition modifiers
pub fn effective_attack(pokemon: &PokemonInst, move_data: &MoveData) -> u16 {
    let base_attack = match move_data.category {
        MoveCategory::Physical => pokemon.stats.attack,
        MoveCategory::Special => pokemon.stats.sp_attack,
        MoveCategory::Status => return 0, // Status moves don't use attack stats
    };

    // Burn halves physical attack only
    if move_data.category == MoveCategory::Physical
        && matches!(pokemon.status, Some(StatusCondition::Burn))
    {
        return base_attack / 2;
    }

    base_attack
}

/// Calculate the defense stat a move is resisted with
pub fn effective_defense(pokemon: &PokemonInst, move_data: &MoveData) -> u16 {
    match move_data.category {
        MoveCategory::Physical => pokemon.stats.defense,
        MoveCategory::Special => pokemon.stats.sp_defense,
        MoveCategory::Status => 0, // Status moves don't target defense
    }
}

/// Calculate effective speed including paralysis (half speed)
pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    let base_speed = pokemon.stats.speed;

    if matches!(pokemon.status, Some(StatusCondition::Paralysis)) {
        return base_speed / 2;
    }

    base_speed
}

/// Roll accuracy for a move. Returns true if the move hits.
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let roll = rng.next_outcome("Accuracy Check");
    roll <= move_data.accuracy
}
