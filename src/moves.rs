use crate::pokemon::{PokemonType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Immutable definition of a move, as loaded from the dex.
///
/// Per-battle mutable state (remaining PP) lives in
/// `crate::pokemon::MoveInstance`, which wraps one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    /// Kebab-case move id, e.g. "thunder-shock"
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Base power; 0 for moves that deal no direct damage
    pub power: u8,
    /// Hit chance as a percentage, 1..=100
    pub accuracy: u8,
    pub max_pp: u8,
    /// Status condition this move can inflict, if any
    pub ailment: Option<StatusType>,
    /// Chance of inflicting the ailment, 0..=100. Zero means the ailment is
    /// guaranteed when the move is a pure status move.
    pub ailment_chance: u8,
}

impl MoveData {
    /// Human-readable name: "thunder-shock" -> "Thunder Shock"
    pub fn display_name(&self) -> String {
        self.name
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A move deals damage iff it is physical or special and has power
    pub fn is_damaging(&self) -> bool {
        matches!(self.category, MoveCategory::Physical | MoveCategory::Special) && self.power > 0
    }

    /// The universal fallback move. Substituted when a Pokemon has no usable
    /// moves left, and used to pad move lists during team construction.
    pub fn struggle() -> MoveData {
        MoveData {
            name: "struggle".to_string(),
            move_type: PokemonType::Normal,
            category: MoveCategory::Physical,
            power: 50,
            accuracy: 100,
            max_pp: 99,
            ailment: None,
            ailment_chance: 0,
        }
    }
}
