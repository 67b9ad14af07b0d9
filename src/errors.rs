use std::fmt;

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error related to dex data lookup or parsing
    Dex(DexError),
    /// Error related to team construction
    Team(TeamError),
    /// Error related to invalid battle state
    BattleState(StateError),
    /// Error related to invalid player actions
    Action(ActionError),
    /// Error related to the pokedex record store
    Pokedex(PokedexError),
}

/// Errors related to dex data operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexError {
    /// The specified species id was not found in the dex
    SpeciesNotFound(u16),
    /// The specified move name was not found in the dex
    MoveNotFound(String),
    /// Dex data is malformed or incomplete
    MalformedData(String),
}

/// Errors related to team construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    /// No requested species could be built into a usable Pokemon
    NoUsablePokemon,
    /// More Pokemon were requested than a team can hold
    TeamTooLarge(usize),
    /// The requested prefab team id does not exist
    UnknownTeam(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// No active Pokemon found when one was expected
    NoActivePokemon,
    /// Invalid player index
    InvalidPlayerIndex(usize),
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index is out of bounds or the slot is empty
    InvalidMoveIndex(usize),
    /// Team index is out of bounds or the slot is empty
    InvalidPokemonIndex(usize),
    /// Action is not valid in the current battle state
    InvalidAction(String),
}

/// Errors related to the pokedex record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// Reading or writing the store file failed
    Io(String),
    /// The store contents could not be serialized or deserialized
    Serialization(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Dex(err) => write!(f, "Dex data error: {}", err),
            EngineError::Team(err) => write!(f, "Team error: {}", err),
            EngineError::BattleState(err) => write!(f, "Battle state error: {}", err),
            EngineError::Action(err) => write!(f, "Action error: {}", err),
            EngineError::Pokedex(err) => write!(f, "Pokedex error: {}", err),
        }
    }
}

impl fmt::Display for DexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DexError::SpeciesNotFound(id) => write!(f, "Species not found: #{}", id),
            DexError::MoveNotFound(name) => write!(f, "Move not found: {}", name),
            DexError::MalformedData(details) => write!(f, "Malformed dex data: {}", details),
        }
    }
}

impl fmt::Display for TeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamError::NoUsablePokemon => write!(f, "No usable Pokemon could be built"),
            TeamError::TeamTooLarge(count) => write!(f, "Team too large: {} Pokemon", count),
            TeamError::UnknownTeam(id) => write!(f, "Unknown team id: {}", id),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NoActivePokemon => write!(f, "No active Pokemon found"),
            StateError::InvalidPlayerIndex(index) => write!(f, "Invalid player index: {}", index),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::InvalidPokemonIndex(index) => write!(f, "Invalid Pokemon index: {}", index),
            ActionError::InvalidAction(details) => write!(f, "Invalid action: {}", details),
        }
    }
}

impl fmt::Display for PokedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokedexError::Io(details) => write!(f, "Pokedex store IO error: {}", details),
            PokedexError::Serialization(details) => {
                write!(f, "Pokedex store serialization error: {}", details)
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for DexError {}
impl std::error::Error for TeamError {}
impl std::error::Error for StateError {}
impl std::error::Error for ActionError {}
impl std::error::Error for PokedexError {}

impl From<DexError> for EngineError {
    fn from(err: DexError) -> Self {
        EngineError::Dex(err)
    }
}

impl From<TeamError> for EngineError {
    fn from(err: TeamError) -> Self {
        EngineError::Team(err)
    }
}

impl From<StateError> for EngineError {
    fn from(err: StateError) -> Self {
        EngineError::BattleState(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

impl From<PokedexError> for EngineError {
    fn from(err: PokedexError) -> Self {
        EngineError::Pokedex(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;

/// Type alias for Results using TeamError
pub type TeamResult<T> = Result<T, TeamError>;

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;
