#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::{BattleEvent, BattleState, TurnRng};
    use crate::battle::tests::common::{create_test_battle, physical_move, TestPokemonBuilder};
    use crate::player::PlayerAction;
    use crate::pokemon::PokemonType;
    use pretty_assertions::assert_eq;

    /// Fast attacker, slow defender, one tackle each.
    fn crit_test_battle() -> BattleState {
        let attacker = TestPokemonBuilder::new("Luckymon")
            .with_base_speed(90)
            .with_moves(vec![physical_move("tackle", PokemonType::Normal, 40)])
            .build();
        let defender = TestPokemonBuilder::new("Tankmon")
            .with_base_speed(40)
            .with_moves(vec![physical_move("scratch", PokemonType::Normal, 40)])
            .build();
        let mut battle_state = create_test_battle(attacker, defender);
        battle_state.action_queue[0] = Some(PlayerAction::UseMove { move_index: 0 });
        battle_state.action_queue[1] = Some(PlayerAction::UseMove { move_index: 0 });
        battle_state
    }

    fn first_damage_against(events: &[BattleEvent], name: &str) -> u16 {
        events
            .iter()
            .find_map(|e| match e {
                BattleEvent::DamageDealt { target, damage, .. } if target == name => Some(*damage),
                _ => None,
            })
            .expect("attack should deal damage")
    }

    #[test]
    fn test_critical_roll_doubles_damage_and_is_announced() {
        // Identical turns except for the critical die: 6 crits, 7 does not.
        // A max variance roll pins the random factor at exactly 1.0.
        let mut crit_state = crit_test_battle();
        let crit_bus = resolve_turn(
            &mut crit_state,
            TurnRng::new_for_test(vec![50, 6, 100, 50, 50, 50]),
        );

        let mut plain_state = crit_test_battle();
        let plain_bus = resolve_turn(
            &mut plain_state,
            TurnRng::new_for_test(vec![50, 7, 100, 50, 50, 50]),
        );

        let crit_damage = first_damage_against(crit_bus.events(), "Tankmon");
        let plain_damage = first_damage_against(plain_bus.events(), "Tankmon");

        assert_eq!(plain_damage, 29);
        assert_eq!(crit_damage, 58);

        assert!(crit_bus.events().iter().any(|e| matches!(
            e,
            BattleEvent::CriticalHit { attacker } if attacker == "Luckymon"
        )));
        assert!(!plain_bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::CriticalHit { .. })));
    }

    #[test]
    fn test_critical_announcement_follows_the_damage_events() {
        let mut battle_state = crit_test_battle();
        let bus = resolve_turn(
            &mut battle_state,
            TurnRng::new_for_test(vec![50, 6, 100, 50, 50, 50]),
        );
        let events = bus.events();

        let damage_pos = events
            .iter()
            .position(|e| matches!(e, BattleEvent::DamageDealt { .. }))
            .expect("damage event");
        let effectiveness_pos = events
            .iter()
            .position(|e| matches!(e, BattleEvent::AttackTypeEffectiveness { .. }))
            .expect("effectiveness event");
        let crit_pos = events
            .iter()
            .position(|e| matches!(e, BattleEvent::CriticalHit { .. }))
            .expect("critical hit event");

        assert!(damage_pos < effectiveness_pos);
        assert!(effectiveness_pos < crit_pos);
    }
}
