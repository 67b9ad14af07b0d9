use crate::pokemon::PokemonType;

/// Chart lookup for one attacking type against one defending type.
/// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
pub fn chart_multiplier(attacking: PokemonType, defending: PokemonType) -> f32 {
    use PokemonType::*;

    match (attacking, defending) {
        // Normal
        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, Ghost) => 0.0,
        (Normal, _) => 1.0,

        // Fire
        (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
        (Fire, _) => 1.0,

        // Water
        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
        (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
        (Water, _) => 1.0,

        // Grass
        (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Poison)
        | (Grass, Flying)
        | (Grass, Bug)
        | (Grass, Dragon)
        | (Grass, Steel) => 0.5,
        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
        (Grass, _) => 1.0,

        // Electric
        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
        (Electric, Ground) => 0.0,
        (Electric, Water) | (Electric, Flying) => 2.0,
        (Electric, _) => 1.0,

        // Ice
        (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
        (Ice, _) => 1.0,

        // Fighting
        (Fighting, Poison)
        | (Fighting, Flying)
        | (Fighting, Psychic)
        | (Fighting, Bug)
        | (Fighting, Fairy) => 0.5,
        (Fighting, Ghost) => 0.0,
        (Fighting, Normal)
        | (Fighting, Ice)
        | (Fighting, Rock)
        | (Fighting, Dark)
        | (Fighting, Steel) => 2.0,
        (Fighting, _) => 1.0,

        // Poison
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, Steel) => 0.0,
        (Poison, Grass) | (Poison, Fairy) => 2.0,
        (Poison, _) => 1.0,

        // Ground
        (Ground, Grass) | (Ground, Bug) => 0.5,
        (Ground, Flying) => 0.0,
        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock)
        | (Ground, Steel) => 2.0,
        (Ground, _) => 1.0,

        // Flying
        (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
        (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
        (Flying, _) => 1.0,

        // Psychic
        (Psychic, Psychic) | (Psychic, Steel) => 0.5,
        (Psychic, Dark) => 0.0,
        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, _) => 1.0,

        // Bug
        (Bug, Fire)
        | (Bug, Fighting)
        | (Bug, Poison)
        | (Bug, Flying)
        | (Bug, Ghost)
        | (Bug, Steel)
        | (Bug, Fairy) => 0.5,
        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
        (Bug, _) => 1.0,

        // Rock
        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
        (Rock, _) => 1.0,

        // Ghost
        (Ghost, Normal) => 0.0,
        (Ghost, Dark) => 0.5,
        (Ghost, Psychic) | (Ghost, Ghost) => 2.0,
        (Ghost, _) => 1.0,

        // Dragon
        (Dragon, Steel) => 0.5,
        (Dragon, Fairy) => 0.0,
        (Dragon, Dragon) => 2.0,
        (Dragon, _) => 1.0,

        // Dark
        (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
        (Dark, Psychic) | (Dark, Ghost) => 2.0,
        (Dark, _) => 1.0,

        // Steel
        (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
        (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
        (Steel, _) => 1.0,

        // Fairy
        (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,
        (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
        (Fairy, _) => 1.0,
    }
}

/// Combined effectiveness against a defender's full type set: the product of
/// the chart lookup for each defending type. Dual types can stack to 4.0 or
/// 0.25, and a single immune type zeroes the whole product.
pub fn effectiveness(attacking: PokemonType, defender_types: &[PokemonType]) -> f32 {
    defender_types
        .iter()
        .map(|&defending| chart_multiplier(attacking, defending))
        .product()
}

/// Narration tag for an effectiveness multiplier. Empty for neutral hits.
pub fn effectiveness_text(multiplier: f32) -> &'static str {
    if multiplier == 0.0 {
        "It had no effect..."
    } else if multiplier >= 2.0 {
        "It's super effective!"
    } else if multiplier < 1.0 {
        "It's not very effective..."
    } else {
        ""
    }
}
