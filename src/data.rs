//! Static species and move data, and the team builder that turns it into
//! battle-ready Pokemon.
//!
//! The default `RonDataSource` serves the RON tables embedded in the binary.
//! Anything that can answer species and move lookups (a test fixture, a
//! network client) can stand in through the `DataSource` trait.

use crate::errors::{DexError, DexResult, TeamError, TeamResult};
use crate::moves::MoveData;
use crate::player::{BattlePlayer, PlayerKind};
use crate::pokemon::{BaseStats, PokemonInst, PokemonType};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One entry in a species' level-up learnset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub move_name: String,
    pub level: u8,
}

/// Static data for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub learnset: Vec<LearnsetEntry>,
}

/// Anything that can answer species and move lookups
pub trait DataSource {
    fn species(&self, species_id: u16) -> DexResult<SpeciesData>;
    fn move_data(&self, move_name: &str) -> DexResult<MoveData>;
}

static POKEDEX: LazyLock<HashMap<u16, SpeciesData>> = LazyLock::new(|| {
    let entries: Vec<SpeciesData> = ron::from_str(include_str!("../data/pokedex.ron"))
        .expect("embedded pokedex data should parse");
    entries.into_iter().map(|s| (s.id, s)).collect()
});

static MOVE_DEX: LazyLock<HashMap<String, MoveData>> = LazyLock::new(|| {
    let entries: Vec<MoveData> = ron::from_str(include_str!("../data/moves.ron"))
        .expect("embedded move data should parse");
    entries.into_iter().map(|m| (m.name.clone(), m)).collect()
});

/// Data source backed by the RON tables compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct RonDataSource;

impl RonDataSource {
    pub fn new() -> Self {
        Self
    }

    /// All species ids in the embedded pokedex, ascending
    pub fn species_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = POKEDEX.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl DataSource for RonDataSource {
    fn species(&self, species_id: u16) -> DexResult<SpeciesData> {
        POKEDEX
            .get(&species_id)
            .cloned()
            .ok_or(DexError::SpeciesNotFound(species_id))
    }

    fn move_data(&self, move_name: &str) -> DexResult<MoveData> {
        MOVE_DEX
            .get(move_name)
            .cloned()
            .ok_or_else(|| DexError::MoveNotFound(move_name.to_string()))
    }
}

/// Builds battle-ready Pokemon and whole players from a data source
pub struct TeamBuilder<'a> {
    source: &'a dyn DataSource,
}

impl<'a> TeamBuilder<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Build one Pokemon of the given species at the given level, with a
    /// moveset picked from its learnset. A move that fails to resolve is
    /// skipped rather than failing the build; a Pokemon that ends up with
    /// no moves at all still fights with Struggle.
    pub fn build_pokemon(&self, species_id: u16, level: u8) -> DexResult<PokemonInst> {
        let species = self.source.species(species_id)?;

        let mut moves = Vec::new();
        for move_name in self.select_moves(&species, level) {
            if let Ok(data) = self.source.move_data(&move_name) {
                moves.push(data);
            }
        }

        Ok(PokemonInst::new(
            species.id,
            species.name.clone(),
            level,
            species.types.clone(),
            &species.base_stats,
            moves,
        ))
    }

    /// Build a full battle player from up to six species
    pub fn build_player(
        &self,
        player_name: &str,
        kind: PlayerKind,
        species_ids: &[u16],
        level: u8,
    ) -> TeamResult<BattlePlayer> {
        if species_ids.len() > 6 {
            return Err(TeamError::TeamTooLarge(species_ids.len()));
        }

        let mut team = Vec::new();
        for &species_id in species_ids {
            if let Ok(pokemon) = self.build_pokemon(species_id, level) {
                team.push(pokemon);
            }
        }

        if team.is_empty() {
            return Err(TeamError::NoUsablePokemon);
        }

        Ok(BattlePlayer::new(player_name.to_string(), team, kind))
    }

    /// Pick up to four move names for a species at a level.
    ///
    /// Damaging moves the species has learned by this level are scored by
    /// power with a 1.5x STAB weighting. The pick order is: the best STAB
    /// move, then the strongest moves of types not yet covered until three
    /// are chosen, then the best of whatever is left.
    fn select_moves(&self, species: &SpeciesData, level: u8) -> Vec<String> {
        let eligible: Vec<&LearnsetEntry> = {
            let learned: Vec<&LearnsetEntry> = species
                .learnset
                .iter()
                .filter(|entry| entry.level <= level)
                .collect();
            if learned.is_empty() {
                // Below every learn level: consider the early learnset anyway
                species.learnset.iter().take(10).collect()
            } else {
                learned
            }
        };

        let mut scored: Vec<(String, PokemonType, f32)> = Vec::new();
        for entry in eligible {
            let Ok(data) = self.source.move_data(&entry.move_name) else {
                continue;
            };
            if data.power == 0 {
                continue;
            }
            let stab = if species.types.contains(&data.move_type) {
                1.5
            } else {
                1.0
            };
            scored.push((data.name.clone(), data.move_type, data.power as f32 * stab));
        }
        scored.sort_by_key(|(_, _, score)| Reverse(OrderedFloat(*score)));

        let mut selected: Vec<String> = Vec::new();
        let mut covered_types: Vec<PokemonType> = Vec::new();

        // Lead with the best same-type attack
        if let Some((name, move_type, _)) = scored
            .iter()
            .find(|(_, move_type, _)| species.types.contains(move_type))
        {
            selected.push(name.clone());
            covered_types.push(*move_type);
        }

        // Diversify coverage before stacking power
        for (name, move_type, _) in &scored {
            if selected.len() >= 3 {
                break;
            }
            if selected.contains(name) || covered_types.contains(move_type) {
                continue;
            }
            selected.push(name.clone());
            covered_types.push(*move_type);
        }

        // Top up with the strongest leftovers
        for (name, _, _) in &scored {
            if selected.len() >= 4 {
                break;
            }
            if !selected.contains(name) {
                selected.push(name.clone());
            }
        }

        selected
    }
}
