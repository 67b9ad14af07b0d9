use crate::data::{RonDataSource, TeamBuilder};
use crate::errors::{TeamError, TeamResult};
use crate::player::{BattlePlayer, PlayerKind};
use crate::pokemon::PokemonInst;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A prefab team: a display name and the species that make it up
#[derive(Debug, Clone)]
pub struct TeamTemplate {
    pub display_name: &'static str,
    pub species_ids: [u16; 6],
    pub level: u8,
}

static TEAM_DATA: LazyLock<HashMap<&'static str, TeamTemplate>> = LazyLock::new(|| {
    HashMap::from([
        (
            "demo_kanto_starters",
            TeamTemplate {
                display_name: "Kanto Starters",
                // Venusaur, Charizard, Blastoise, Pikachu, Snorlax, Dragonite
                species_ids: [3, 6, 9, 25, 143, 149],
                level: 50,
            },
        ),
        (
            "demo_tidal_wave",
            TeamTemplate {
                display_name: "Tidal Wave",
                // Squirtle, Blastoise, Starmie, Gyarados, Lapras, Raichu
                species_ids: [7, 9, 121, 130, 131, 26],
                level: 50,
            },
        ),
        (
            "demo_power_trip",
            TeamTemplate {
                display_name: "Power Trip",
                // Arcanine, Alakazam, Machamp, Golem, Gengar, Rhydon
                species_ids: [59, 65, 68, 76, 94, 112],
                level: 50,
            },
        ),
    ])
});

/// Create a team of Pokemon from a team template
pub fn create_team_from_template(team_id: &str) -> Option<Vec<PokemonInst>> {
    let source = RonDataSource::new();
    let builder = TeamBuilder::new(&source);

    TEAM_DATA.get(team_id).map(|template| {
        template
            .species_ids
            .iter()
            .filter_map(|&species_id| builder.build_pokemon(species_id, template.level).ok())
            .collect()
    })
}

/// Get all available team IDs
pub fn get_available_team_ids() -> Vec<String> {
    TEAM_DATA.keys().map(|id| id.to_string()).collect()
}

/// Get team information without creating Pokemon instances
pub fn get_team_info(team_id: &str) -> Option<&'static TeamTemplate> {
    TEAM_DATA.get(team_id)
}

/// Convert a team template into a BattlePlayer for use in battles
pub fn create_battle_player_from_team(
    team_id: &str,
    player_name: String,
    kind: PlayerKind,
) -> TeamResult<BattlePlayer> {
    let team_pokemon = create_team_from_template(team_id)
        .ok_or_else(|| TeamError::UnknownTeam(team_id.to_string()))?;

    if team_pokemon.is_empty() {
        return Err(TeamError::NoUsablePokemon);
    }

    Ok(BattlePlayer::new(player_name, team_pokemon, kind))
}

/// The demo teams, balanced against each other for exhibition battles
pub fn get_demo_team_ids() -> Vec<String> {
    vec![
        "demo_kanto_starters".to_string(),
        "demo_tidal_wave".to_string(),
        "demo_power_trip".to_string(),
    ]
}
