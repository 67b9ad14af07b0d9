use crate::battle::state::{BattleState, TurnRng};
use crate::moves::{MoveCategory, MoveData};
use crate::player::{BattlePlayer, PlayerKind};
use crate::pokemon::{BaseStats, PokemonInst, PokemonType, StatusCondition, StatusType};

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```rust,ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(vec![physical_move("tackle", PokemonType::Normal, 40)])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    base_stats: BaseStats,
    moves: Vec<MoveData>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder: a level 50 Normal type with flat base 70
    /// stats and no moves (slots fill with Struggle).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 50,
            types: vec![PokemonType::Normal],
            base_stats: BaseStats {
                hp: 70,
                attack: 70,
                defense: 70,
                sp_attack: 70,
                sp_defense: 70,
                speed: 70,
            },
            moves: Vec::new(),
            status: None,
            current_hp: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_base_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    /// Overrides only the base speed, for turn order tests.
    pub fn with_base_speed(mut self, speed: u8) -> Self {
        self.base_stats.speed = speed;
        self
    }

    /// Overrides only the base HP, for faint and residual damage tests.
    pub fn with_base_hp(mut self, hp: u8) -> Self {
        self.base_stats.hp = hp;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let mut pokemon = PokemonInst::new(
            0,
            self.name,
            self.level,
            self.types,
            &self.base_stats,
            self.moves,
        );

        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.current_hp = hp.min(pokemon.max_hp());
        }

        pokemon
    }
}

/// A plain physical attack with 100 accuracy and 20 PP.
pub fn physical_move(name: &str, move_type: PokemonType, power: u8) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        category: MoveCategory::Physical,
        power,
        accuracy: 100,
        max_pp: 20,
        ailment: None,
        ailment_chance: 0,
    }
}

/// A plain special attack with 100 accuracy and 20 PP.
pub fn special_move(name: &str, move_type: PokemonType, power: u8) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        category: MoveCategory::Special,
        power,
        accuracy: 100,
        max_pp: 20,
        ailment: None,
        ailment_chance: 0,
    }
}

/// A pure status move that always inflicts its ailment on hit.
pub fn status_move(name: &str, move_type: PokemonType, ailment: StatusType) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        category: MoveCategory::Status,
        power: 0,
        accuracy: 100,
        max_pp: 20,
        ailment: Some(ailment),
        ailment_chance: 0,
    }
}

/// A damaging move with a percentage chance of inflicting an ailment.
pub fn move_with_ailment(
    name: &str,
    move_type: PokemonType,
    power: u8,
    ailment: StatusType,
    chance: u8,
) -> MoveData {
    MoveData {
        name: name.to_string(),
        move_type,
        category: MoveCategory::Special,
        power,
        accuracy: 100,
        max_pp: 20,
        ailment: Some(ailment),
        ailment_chance: chance,
    }
}

/// Creates a default test player with a given name and team.
pub fn create_test_player(name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(name.to_string(), team, PlayerKind::Human)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(p1_pokemon: PokemonInst, p2_pokemon: PokemonInst) -> BattleState {
    create_test_battle_with_teams(vec![p1_pokemon], vec![p2_pokemon])
}

/// Creates a battle state with full teams on each side.
pub fn create_test_battle_with_teams(
    team1: Vec<PokemonInst>,
    team2: Vec<PokemonInst>,
) -> BattleState {
    let player1 = create_test_player("Player 1", team1);
    let player2 = create_test_player("Player 2", team2);
    BattleState::new(player1, player2)
}

/// Creates a `TurnRng` with a long list of median values. Useful for tests
/// where the specific RNG outcome is not important: every accuracy check
/// hits, nothing crits, paralysis does not immobilize, freeze does not thaw.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}
