use crate::moves::MoveData;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// The kind of status condition a move can inflict. Carries no per-battle
/// state, unlike `StatusCondition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusType {
    Burn,
    Paralysis,
    Poison,
    Sleep,
    Freeze,
}

/// An active status condition on a Pokemon. Sleep tracks its remaining
/// blocked turns, rolled when the condition is applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Poison,
    Sleep(u8),
    Freeze,
}

impl StatusCondition {
    pub fn from_type(status_type: StatusType, sleep_turns: u8) -> StatusCondition {
        match status_type {
            StatusType::Burn => StatusCondition::Burn,
            StatusType::Paralysis => StatusCondition::Paralysis,
            StatusType::Poison => StatusCondition::Poison,
            StatusType::Sleep => StatusCondition::Sleep(sleep_turns),
            StatusType::Freeze => StatusCondition::Freeze,
        }
    }

    pub fn status_type(&self) -> StatusType {
        match self {
            StatusCondition::Burn => StatusType::Burn,
            StatusCondition::Paralysis => StatusType::Paralysis,
            StatusCondition::Poison => StatusType::Poison,
            StatusCondition::Sleep(_) => StatusType::Sleep,
            StatusCondition::Freeze => StatusType::Freeze,
        }
    }

    /// Recurring damage dealt at end of turn. Burn chips a sixteenth of max
    /// HP, poison an eighth, both at least 1. Other conditions deal none.
    pub fn end_of_turn_damage(&self, max_hp: u16) -> u16 {
        match self {
            StatusCondition::Burn => (max_hp / 16).max(1),
            StatusCondition::Poison => (max_hp / 8).max(1),
            _ => 0,
        }
    }
}

/// Species base stats, before any level scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

/// Battle stats derived from base stats and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

/// A move slot on a battle-ready Pokemon: the move definition plus its
/// remaining PP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.max_pp;
        MoveInstance { data, pp }
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Use the move (decrease PP). No-op once PP is exhausted.
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    /// Restore PP to full
    pub fn restore_pp(&mut self) {
        self.pp = self.data.max_pp;
    }
}

/// A battle-ready Pokemon built from dex data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species_id: u16,
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub stats: Stats,
    pub current_hp: u16,
    /// Always exactly 4 slots; short move lists are padded with Struggle
    pub moves: [MoveInstance; 4],
    pub status: Option<StatusCondition>,
}

impl PokemonInst {
    /// Create a battle-ready Pokemon. Stats are derived from base stats and
    /// level; the move list is truncated or Struggle-padded to 4 entries.
    pub fn new(
        species_id: u16,
        name: String,
        level: u8,
        types: Vec<PokemonType>,
        base_stats: &BaseStats,
        moves: Vec<MoveData>,
    ) -> Self {
        let stats = Self::calculate_stats(base_stats, level);

        let move_list: Vec<MoveInstance> = moves
            .into_iter()
            .take(4)
            .map(MoveInstance::new)
            .collect();
        let moves: [MoveInstance; 4] = std::array::from_fn(|i| {
            move_list
                .get(i)
                .cloned()
                .unwrap_or_else(|| MoveInstance::new(MoveData::struggle()))
        });

        PokemonInst {
            species_id,
            name,
            level,
            types,
            stats,
            current_hp: stats.hp,
            moves,
            status: None,
        }
    }

    /// Derive battle stats: `stat = 2 * base * level / 100 + 5`, except HP
    /// which is `2 * base * level / 100 + level + 10`
    fn calculate_stats(base_stats: &BaseStats, level: u8) -> Stats {
        let level = level as u16;
        let stat = |base: u8| 2 * base as u16 * level / 100 + 5;

        Stats {
            hp: 2 * base_stats.hp as u16 * level / 100 + level + 10,
            attack: stat(base_stats.attack),
            defense: stat(base_stats.defense),
            sp_attack: stat(base_stats.sp_attack),
            sp_defense: stat(base_stats.sp_defense),
            speed: stat(base_stats.speed),
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Fraction of HP remaining, 0.0 to 1.0
    pub fn hp_fraction(&self) -> f32 {
        if self.stats.hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.stats.hp as f32
    }

    /// Apply damage, clamping at 0 HP
    pub fn take_damage(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restore HP, clamping at max
    pub fn heal(&mut self, amount: u16) {
        self.current_hp = (self.current_hp + amount).min(self.stats.hp);
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Install a status condition. Statuses do not stack: returns false and
    /// leaves the Pokemon untouched if one is already active.
    pub fn apply_status(&mut self, condition: StatusCondition) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(condition);
        true
    }

    /// Remove the active status condition, returning it
    pub fn clear_status(&mut self) -> Option<StatusCondition> {
        self.status.take()
    }

    /// Indices of move slots with PP remaining
    pub fn usable_move_indices(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.has_pp())
            .map(|(index, _)| index)
            .collect()
    }

    /// Full recovery: HP, status, and PP
    pub fn heal_fully(&mut self) {
        self.current_hp = self.stats.hp;
        self.status = None;
        for slot in &mut self.moves {
            slot.restore_pp();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_base_stats() -> BaseStats {
        BaseStats {
            hp: 60,
            attack: 95,
            defense: 50,
            sp_attack: 80,
            sp_defense: 70,
            speed: 90,
        }
    }

    fn test_pokemon() -> PokemonInst {
        PokemonInst::new(
            25,
            "Pikachu".to_string(),
            50,
            vec![PokemonType::Electric],
            &test_base_stats(),
            vec![],
        )
    }

    #[test]
    fn test_stat_calculation_at_level_50() {
        let pokemon = test_pokemon();

        // stat = 2 * base * 50 / 100 + 5 = base + 5 at level 50
        assert_eq!(pokemon.stats.attack, 100);
        assert_eq!(pokemon.stats.defense, 55);
        assert_eq!(pokemon.stats.sp_attack, 85);
        assert_eq!(pokemon.stats.sp_defense, 75);
        assert_eq!(pokemon.stats.speed, 95);
        // hp = 2 * 60 * 50 / 100 + 50 + 10 = 120
        assert_eq!(pokemon.stats.hp, 120);
        assert_eq!(pokemon.current_hp, 120);
    }

    #[test]
    fn test_stat_calculation_floors_intermediate_division() {
        let base = BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            sp_attack: 65,
            sp_defense: 65,
            speed: 45,
        };
        let pokemon = PokemonInst::new(1, "Bulbasaur".to_string(), 33, vec![], &base, vec![]);

        // 2 * 49 * 33 / 100 = 32 (floored from 32.34), + 5 = 37
        assert_eq!(pokemon.stats.attack, 37);
        // hp: 2 * 45 * 33 / 100 = 29 (floored from 29.7), + 33 + 10 = 72
        assert_eq!(pokemon.stats.hp, 72);
    }

    #[test]
    fn test_empty_move_list_is_padded_with_struggle() {
        let pokemon = test_pokemon();

        assert_eq!(pokemon.moves.len(), 4);
        for slot in &pokemon.moves {
            assert_eq!(slot.data.name, "struggle");
            assert_eq!(slot.pp, 99);
        }
    }

    #[test]
    fn test_short_move_list_keeps_real_moves_first() {
        let thunderbolt = MoveData {
            name: "thunderbolt".to_string(),
            move_type: PokemonType::Electric,
            category: crate::moves::MoveCategory::Special,
            power: 90,
            accuracy: 100,
            max_pp: 15,
            ailment: Some(StatusType::Paralysis),
            ailment_chance: 10,
        };
        let pokemon = PokemonInst::new(
            25,
            "Pikachu".to_string(),
            50,
            vec![PokemonType::Electric],
            &test_base_stats(),
            vec![thunderbolt],
        );

        assert_eq!(pokemon.moves[0].data.name, "thunderbolt");
        assert_eq!(pokemon.moves[0].pp, 15);
        assert_eq!(pokemon.moves[1].data.name, "struggle");
        assert_eq!(pokemon.moves[3].data.name, "struggle");
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut pokemon = test_pokemon();

        pokemon.take_damage(50);
        assert_eq!(pokemon.current_hp, 70);
        assert!(!pokemon.is_fainted());

        pokemon.take_damage(500);
        assert_eq!(pokemon.current_hp, 0);
        assert!(pokemon.is_fainted());
    }

    #[test]
    fn test_heal_clamps_at_max_hp() {
        let mut pokemon = test_pokemon();
        pokemon.take_damage(100);

        pokemon.heal(40);
        assert_eq!(pokemon.current_hp, 60);

        pokemon.heal(9999);
        assert_eq!(pokemon.current_hp, pokemon.max_hp());
    }

    #[test]
    fn test_statuses_do_not_stack() {
        let mut pokemon = test_pokemon();

        assert!(pokemon.apply_status(StatusCondition::Burn));
        assert!(!pokemon.apply_status(StatusCondition::Poison));
        assert_eq!(pokemon.status, Some(StatusCondition::Burn));

        assert_eq!(pokemon.clear_status(), Some(StatusCondition::Burn));
        assert!(pokemon.apply_status(StatusCondition::Poison));
    }

    #[test]
    fn test_end_of_turn_damage_amounts() {
        assert_eq!(StatusCondition::Burn.end_of_turn_damage(100), 6);
        assert_eq!(StatusCondition::Poison.end_of_turn_damage(100), 12);
        // Minimum 1 even for tiny HP pools
        assert_eq!(StatusCondition::Burn.end_of_turn_damage(10), 1);
        assert_eq!(StatusCondition::Poison.end_of_turn_damage(7), 1);
        assert_eq!(StatusCondition::Paralysis.end_of_turn_damage(100), 0);
        assert_eq!(StatusCondition::Sleep(2).end_of_turn_damage(100), 0);
        assert_eq!(StatusCondition::Freeze.end_of_turn_damage(100), 0);
    }

    #[test]
    fn test_pp_invariant_under_repeated_use() {
        let mut slot = MoveInstance::new(MoveData {
            name: "tackle".to_string(),
            move_type: PokemonType::Normal,
            category: crate::moves::MoveCategory::Physical,
            power: 40,
            accuracy: 100,
            max_pp: 3,
            ailment: None,
            ailment_chance: 0,
        });

        assert!(slot.use_move());
        assert!(slot.use_move());
        assert!(slot.use_move());
        assert_eq!(slot.pp, 0);
        // Exhausted: use is a no-op
        assert!(!slot.use_move());
        assert_eq!(slot.pp, 0);

        slot.restore_pp();
        assert_eq!(slot.pp, 3);
    }

    #[test]
    fn test_heal_fully_restores_hp_status_and_pp() {
        let mut pokemon = test_pokemon();
        pokemon.take_damage(80);
        pokemon.apply_status(StatusCondition::Poison);
        pokemon.moves[0].use_move();

        pokemon.heal_fully();

        assert_eq!(pokemon.current_hp, pokemon.max_hp());
        assert_eq!(pokemon.status, None);
        assert_eq!(pokemon.moves[0].pp, pokemon.moves[0].data.max_pp);
    }

    #[test]
    fn test_sleep_carries_its_counter() {
        let condition = StatusCondition::from_type(StatusType::Sleep, 3);
        assert_eq!(condition, StatusCondition::Sleep(3));
        assert_eq!(condition.status_type(), StatusType::Sleep);

        let burn = StatusCondition::from_type(StatusType::Burn, 0);
        assert_eq!(burn, StatusCondition::Burn);
    }
}
