//! Population lifecycle integration tests

mod common;

use std::collections::BTreeSet;

use ahash::AHashMap;
use proptest::prelude::*;
use realm_core::core::types::EntityId;
use realm_core::skills::combat::CombatStyle;
use realm_core::Realm;

fn ids(realm: &Realm) -> BTreeSet<EntityId> {
    realm.entities().map(|e| e.id).collect()
}

#[test]
fn test_five_player_slots_spawn_in_order() {
    let realm = common::grass_realm(5);

    let ids: Vec<EntityId> = realm.players.group.ids().collect();
    assert_eq!(ids, (1..=5).map(EntityId).collect::<Vec<_>>());
    assert_eq!(
        realm.players.spawned().iter().copied().collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn test_dead_this_tick_is_exact_through_starvation() {
    let mut config = common::config(16, 2);
    config.population.player_n = 4;
    config.population.npc_enabled = false;
    config.resource.base = 20;
    config.resource.starvation_damage = 40;

    let raw = realm_core::world::terrain::RawTerrain::flat(
        config.map.size,
        realm_core::world::material::Material::Grass,
    );
    let mut realm = Realm::new(config).unwrap();
    realm
        .reset(&raw, &realm_core::world::terrain::FractalTerrain)
        .unwrap();

    let idle = AHashMap::new();
    let mut total_dead = 0;
    for _ in 0..20 {
        let before = ids(&realm);
        let summary = realm.step(&idle);
        let after = ids(&realm);

        let expected: BTreeSet<EntityId> = before.difference(&after).copied().collect();
        let reported: BTreeSet<EntityId> = realm.players.group.dead_this_tick().keys().copied().collect();
        assert_eq!(reported, expected);
        assert_eq!(summary.players_died.len(), expected.len());
        total_dead += expected.len();
    }

    assert_eq!(total_dead, 4);
    assert!(realm.players.group.is_empty());
    assert!(realm.step(&idle).players_died.is_empty());
    assert!(realm.players.group.dead_this_tick().is_empty());
}

#[test]
fn test_killed_npc_is_culled_and_replaced() {
    let mut realm = common::busy_realm(3);
    let idle = AHashMap::new();
    realm.step(&idle);

    let victim = realm.npcs.group.ids().next().unwrap();
    let attacker = EntityId(1);
    assert!(realm.apply_attack(attacker, victim, CombatStyle::Melee, 10_000));

    let summary = realm.step(&idle);
    assert_eq!(summary.npcs_died, vec![victim]);
    assert!(!realm.npcs.group.contains(victim));
    assert!(realm.npcs.group.dead_this_tick().contains_key(&victim));
    assert!(realm.npcs.group.ids().all(|id| id.0 < 0));
}

#[test]
fn test_dead_players_are_not_respawned() {
    let mut realm = common::grass_realm(2);
    realm.entity_mut(EntityId(2)).unwrap().alive = false;
    realm.step(&AHashMap::new());

    let config = realm.config().clone();
    assert_eq!(realm.players.spawn(&config, &mut realm.map), 0);
    assert!(!realm.players.group.contains(EntityId(2)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_entity_ids_follow_sign_and_order(seed in 0u64..500, kills in proptest::collection::vec(0usize..12, 1..12)) {
        let mut realm = common::busy_realm(seed);
        let idle = AHashMap::new();

        let mut npc_order: Vec<i32> = realm.npcs.group.ids().map(|id| id.0).collect();
        let mut seen: BTreeSet<i32> = npc_order.iter().copied().collect();

        for pick in kills {
            let victim = realm.npcs.group.ids().nth(pick % realm.npcs.group.len().max(1));
            let attacker = realm.players.group.ids().next();
            if let (Some(victim), Some(attacker)) = (victim, attacker) {
                realm.apply_attack(attacker, victim, CombatStyle::Mage, 10_000);
            }
            realm.step(&idle);

            for id in realm.npcs.group.ids() {
                if seen.insert(id.0) {
                    npc_order.push(id.0);
                }
            }
            prop_assert!(realm.players.group.ids().all(|id| id.0 > 0));
        }

        prop_assert!(npc_order.iter().all(|&id| id < 0));
        prop_assert!(npc_order.windows(2).all(|w| w[1] < w[0]));
    }
}
