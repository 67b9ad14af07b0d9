// In: src/main.rs

use std::path::Path;

use pokemon_arena::teams::{create_battle_player_from_team, get_demo_team_ids, get_team_info};
use pokemon_arena::{
    BattleRunner, DataSource, Difficulty, PlayerKind, Pokedex, RonDataSource, ScoringAI,
};

fn main() {
    let source = RonDataSource::new();

    // Example 1: Look up a single species in the embedded dex
    match source.species(25) {
        Ok(pikachu) => {
            println!("Loaded {}:", pikachu.name);
            println!("  Number: #{}", pikachu.id);
            println!("  Types: {:?}", pikachu.types);
            println!(
                "  Base Stats: HP:{} ATK:{} DEF:{} SP.ATK:{} SP.DEF:{} SPD:{}",
                pikachu.base_stats.hp,
                pikachu.base_stats.attack,
                pikachu.base_stats.defense,
                pikachu.base_stats.sp_attack,
                pikachu.base_stats.sp_defense,
                pikachu.base_stats.speed
            );
        }
        Err(e) => {
            println!("Error loading species data: {}", e);
            return;
        }
    }

    println!();

    // Example 2: Show the embedded roster and the prebuilt demo teams
    println!("Embedded roster: {} species", source.species_ids().len());
    println!("Available demo teams:");
    for team_id in get_demo_team_ids() {
        if let Some(info) = get_team_info(&team_id) {
            println!(
                "  {} - {} (level {})",
                team_id, info.display_name, info.level
            );
        }
    }

    println!();

    // Example 3: NPC vs NPC battle between two scoring AIs
    println!("=== NPC vs NPC Battle Demo ===");
    run_npc_battle_demo();
}

fn run_npc_battle_demo() {
    let player1 = match create_battle_player_from_team(
        "demo_kanto_starters",
        "AI Trainer Red".to_string(),
        PlayerKind::Npc,
    ) {
        Ok(player) => player,
        Err(e) => {
            println!("Error building team: {:?}", e);
            return;
        }
    };

    let player2 = match create_battle_player_from_team(
        "demo_tidal_wave",
        "AI Trainer Blue".to_string(),
        PlayerKind::Npc,
    ) {
        Ok(player) => player,
        Err(e) => {
            println!("Error building team: {:?}", e);
            return;
        }
    };

    // Record every species fielded in this demo before the battle consumes
    // the player structs
    let pokedex = record_teams(&[&player1, &player2]);

    let mut battle_runner = BattleRunner::new(player1, player2);
    battle_runner.set_behavior(0, Box::new(ScoringAI::new(Difficulty::Hard)));
    battle_runner.set_behavior(1, Box::new(ScoringAI::new(Difficulty::Normal)));

    println!("🔥 Battle begins!");
    for player in &battle_runner.battle_state().players {
        if let Some(pokemon) = player.active_pokemon() {
            println!("  {} sends out {}!", player.player_name, pokemon.name);
        }
    }
    println!();

    let mut execution_count = 0;

    // Battle loop - continue until one trainer has no Pokemon left
    while !battle_runner.is_battle_ended() {
        println!("--- Turn {} ---", battle_runner.get_turn_number() + 1);

        // Print current Pokemon status
        for player in &battle_runner.battle_state().players {
            if let Some(pokemon) = player.active_pokemon() {
                println!(
                    "  {}: {} (HP: {}/{})",
                    player.player_name, pokemon.name, pokemon.current_hp, pokemon.stats.hp
                );
            }
        }
        println!();

        // Auto-generate NPC actions and execute if ready
        match battle_runner.auto_execute_if_ready() {
            Ok(Some(result)) => {
                for event in &result.events {
                    if let Some(message) = event.format(battle_runner.battle_state()) {
                        println!("  {}", message);
                    }
                }
                println!();

                execution_count += 1;

                // Safety check to prevent infinite loops
                if execution_count > 50 {
                    println!("Battle reached execution limit - ending demo");
                    break;
                }
            }
            Ok(None) => {
                println!("Waiting for actions...");
                break;
            }
            Err(e) => {
                println!("Error executing battle: {}", e);
                break;
            }
        }
    }

    // Announce the winner
    if let Some(winner_index) = battle_runner.get_winner() {
        let winner = &battle_runner.battle_state().players[winner_index];
        println!("🏆 {} wins the battle!", winner.player_name);
    } else if battle_runner.is_battle_ended() {
        println!("🤝 The battle ended in a draw!");
    } else {
        println!("🔚 Battle ended (Execution limit reached)");
    }

    println!(
        "Battle completed after {} turn(s).",
        battle_runner.get_turn_number()
    );

    let pokedex_path = Path::new("pokedex.json");
    match pokedex.save(pokedex_path) {
        Ok(()) => println!(
            "Recorded {} species in {}.",
            pokedex.len(),
            pokedex_path.display()
        ),
        Err(e) => println!("Error saving pokedex: {:?}", e),
    }
}

/// Register every Pokemon on the given teams as seen, keeping whatever was
/// already recorded in pokedex.json from earlier runs.
fn record_teams(players: &[&pokemon_arena::BattlePlayer]) -> Pokedex {
    let source = RonDataSource::new();
    let pokedex_path = Path::new("pokedex.json");
    let mut pokedex = Pokedex::load(pokedex_path).unwrap_or_default();

    for player in players {
        for pokemon in player.team.iter().flatten() {
            if let Ok(species) = source.species(pokemon.species_id) {
                pokedex.record_species(&species);
            }
        }
    }

    pokedex
}
