// In: src/lib.rs

//! Pokemon Arena Battle Engine
//!
//! A head-to-head Pokemon battle core: a complete type chart, deterministic
//! damage and status mechanics driven by a pre-generated RNG oracle, and
//! tiered AI opponents, with species and move data compiled into the binary.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod data;
pub mod errors;
pub mod moves;
pub mod player;
pub mod pokedex;
pub mod pokemon;
pub mod teams;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-arena` crate,
// making it easy for users to import the most important types directly.

// Core battle engine functions and state.
pub use battle::engine::{resolve_replacement, resolve_turn};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};

// Damage and AI surfaces.
pub use battle::ai::{Behavior, Difficulty, ScoringAI};
pub use battle::damage::DamageResult;
pub use battle::runner::{BattleRunner, BattleRunnerError, ExecutionResult};

// Core runtime types for a battle.
pub use player::{BattlePlayer, PlayerAction, PlayerKind};
pub use pokemon::{MoveInstance, PokemonInst, PokemonType, StatusCondition, StatusType};

// Primary data access types.
pub use data::{DataSource, RonDataSource, SpeciesData, TeamBuilder};
pub use moves::{MoveCategory, MoveData};
pub use pokedex::{Pokedex, PokedexRecord};

// Crate-specific error and result types.
pub use errors::{
    ActionError, DexError, DexResult, EngineError, EngineResult, PokedexError, PokedexResult,
    StateError, TeamError, TeamResult,
};
