//! A trainer's pokedex: a persistent record of every species seen in battle.

use crate::data::SpeciesData;
use crate::errors::{PokedexError, PokedexResult};
use crate::pokemon::PokemonType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One recorded species entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokedexRecord {
    pub id: u16,
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<PokemonType>,
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
}

impl PokedexRecord {
    pub fn from_species(species: &SpeciesData) -> Self {
        Self {
            id: species.id,
            name: species.name.clone(),
            types: species.types.clone(),
            hp: species.base_stats.hp,
            attack: species.base_stats.attack,
            defense: species.base_stats.defense,
        }
    }
}

/// The record store itself. Serializes to a JSON document with the entry
/// list and a count, pretty-printed for hand inspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pokedex {
    pokemon: Vec<PokedexRecord>,
    count: usize,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a pokedex from a JSON file. A missing file is an empty pokedex,
    /// not an error; a trainer starts with no entries.
    pub fn load(path: &Path) -> PokedexResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| PokedexError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| PokedexError::Serialization(e.to_string()))
    }

    /// Write the pokedex to a JSON file, pretty-printed
    pub fn save(&self, path: &Path) -> PokedexResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PokedexError::Serialization(e.to_string()))?;
        fs::write(path, json).map_err(|e| PokedexError::Io(e.to_string()))
    }

    /// Record an entry. A species already present is left untouched.
    /// Returns true if the entry was new.
    pub fn record(&mut self, record: PokedexRecord) -> bool {
        if self.pokemon.iter().any(|existing| existing.id == record.id) {
            return false;
        }
        self.pokemon.push(record);
        self.count = self.pokemon.len();
        true
    }

    /// Record a species straight from the dex
    pub fn record_species(&mut self, species: &SpeciesData) -> bool {
        self.record(PokedexRecord::from_species(species))
    }

    pub fn contains(&self, species_id: u16) -> bool {
        self.pokemon.iter().any(|record| record.id == species_id)
    }

    pub fn records(&self) -> &[PokedexRecord] {
        &self.pokemon
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }
}
