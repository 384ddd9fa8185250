//! Harvest and survival skill integration tests

mod common;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use realm_core::core::config::RealmConfig;
use realm_core::core::types::{EntityId, Position};
use realm_core::datastore::schema::{EventCode, EventField, Field};
use realm_core::datastore::store::EventLog;
use realm_core::entity::entity::{Action, Entity};
use realm_core::entity::inventory::{ItemIds, ItemKind, Tool, ToolKind};
use realm_core::skills::context::SkillContext;
use realm_core::skills::experience::ExperienceCalculator;
use realm_core::skills::skill::SkillKind;
use realm_core::world::map::TileMap;
use realm_core::world::material::Material;
use realm_core::world::terrain::{FractalTerrain, RawTerrain};

/// Everything an entity update borrows, on a 5x5 play area
struct Harness {
    config: RealmConfig,
    calc: ExperienceCalculator,
    map: TileMap,
    rng: ChaCha8Rng,
    item_ids: ItemIds,
    events: EventLog,
}

impl Harness {
    fn new(place: &[(usize, usize, Material)]) -> Self {
        let config = common::config(5, 1);
        let mut raw = RawTerrain::flat(config.map.size, Material::Grass);
        for &(r, c, material) in place {
            raw.set(r, c, material);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut map = TileMap::new(&config);
        map.reset(&config, &raw, &FractalTerrain, &mut rng).unwrap();

        Self {
            calc: ExperienceCalculator::new(config.progression.level_max),
            config,
            map,
            rng,
            item_ids: ItemIds::new(),
            events: EventLog::new(),
        }
    }

    fn update(&mut self, entity: &mut Entity) {
        let mut ctx = SkillContext {
            config: &self.config,
            calc: &self.calc,
            map: &mut self.map,
            rng: &mut self.rng,
            item_ids: &mut self.item_ids,
            events: &mut self.events,
            tick: 0,
        };
        entity.update(Action::Stay, &mut ctx);
    }

    fn codes(&self) -> Vec<i64> {
        self.events.table().column(EventField::Event.col())
    }
}

fn player(h: &Harness, row: usize, col: usize) -> Entity {
    Entity::new(EntityId(1), Position::new(row, col), &h.config)
}

#[test]
fn test_food_without_forest_drains_and_grants_no_xp() {
    let mut h = Harness::new(&[]);
    let mut entity = player(&h, 3, 3);
    let before = entity.resources.food.val;

    h.update(&mut entity);

    assert_eq!(entity.resources.food.val, before - h.config.resource.depletion_rate);
    assert_eq!(entity.skills.get(SkillKind::Food).exp(), 0.0);
    assert!(h.events.is_empty());
}

#[test]
fn test_food_on_forest_restores_after_draining() {
    let mut h = Harness::new(&[(3, 3, Material::Forest)]);
    let mut entity = player(&h, 3, 3);
    entity.resources.food.val = 20;

    h.update(&mut entity);

    let resource = &h.config.resource;
    assert_eq!(
        entity.resources.food.val,
        20 - resource.depletion_rate + resource.restore_amount()
    );
    assert_eq!(entity.skills.get(SkillKind::Food).exp(), 0.0);
    assert_eq!(h.map.tile(Position::new(3, 3)).unwrap().state, Material::Scrub);
    assert_eq!(h.codes(), vec![EventCode::EatFood.value()]);
}

#[test]
fn test_water_is_adjacent_and_never_depletes() {
    let mut h = Harness::new(&[(3, 4, Material::Water)]);
    let mut entity = player(&h, 3, 3);
    entity.resources.water.val = 10;

    h.update(&mut entity);
    h.update(&mut entity);

    let resource = &h.config.resource;
    let once = 10 - resource.depletion_rate + resource.restore_amount();
    let twice = (once - resource.depletion_rate + resource.restore_amount()).min(resource.base);
    assert_eq!(entity.resources.water.val, twice);
    assert!(!h.map.tile(Position::new(3, 4)).unwrap().depleted);
    assert_eq!(entity.skills.get(SkillKind::Water).exp(), 0.0);
}

#[test]
fn test_adjacent_harvest_checks_up_before_left() {
    let mut h = Harness::new(&[(2, 3, Material::Fish), (3, 2, Material::Fish)]);
    let mut entity = player(&h, 3, 3);

    h.update(&mut entity);

    let up = h.map.tile(Position::new(2, 3)).unwrap();
    let left = h.map.tile(Position::new(3, 2)).unwrap();
    assert!(up.depleted);
    assert_eq!(up.state, Material::Water);
    assert!(!left.depleted);
    assert_eq!(left.state, Material::Fish);

    let fishing = entity.skills.get(SkillKind::Fishing);
    assert_eq!(fishing.exp(), h.config.progression.harvest_xp_scale);
    assert_eq!(entity.inventory.items()[0].kind, ItemKind::Ration);
}

#[test]
fn test_second_tick_takes_next_neighbor() {
    let mut h = Harness::new(&[(2, 3, Material::Fish), (3, 2, Material::Fish)]);
    let mut entity = player(&h, 3, 3);

    h.update(&mut entity);
    h.update(&mut entity);

    assert!(h.map.tile(Position::new(3, 2)).unwrap().depleted);
    assert_eq!(h.map.pending(), vec![Position::new(2, 3), Position::new(3, 2)]);
}

#[test]
fn test_drops_use_matching_tool_level() {
    let mut h = Harness::new(&[(3, 3, Material::Ore)]);
    let mut entity = player(&h, 3, 3);
    entity.equipment.held = Some(Tool {
        kind: ToolKind::Pickaxe,
        level: 4,
    });

    h.update(&mut entity);

    let item = &entity.inventory.items()[0];
    assert_eq!(item.kind, ItemKind::Whetstone);
    assert_eq!(item.level, 4);
}

#[test]
fn test_mismatched_tool_defaults_to_level_one() {
    let mut h = Harness::new(&[(3, 3, Material::Tree)]);
    let mut entity = player(&h, 3, 3);
    entity.equipment.held = Some(Tool {
        kind: ToolKind::Rod,
        level: 7,
    });

    h.update(&mut entity);

    let item = &entity.inventory.items()[0];
    assert_eq!(item.kind, ItemKind::Arrow);
    assert_eq!(item.level, 1);
}

#[test]
fn test_harvest_logs_item_event() {
    let mut h = Harness::new(&[(3, 3, Material::Herb)]);
    let mut entity = player(&h, 3, 3);

    h.update(&mut entity);

    assert!(h.codes().contains(&EventCode::HarvestItem.value()));
    assert_eq!(entity.skills.get(SkillKind::Herbalism).exp(), h.config.progression.harvest_xp_scale);
}

#[test]
fn test_full_inventory_discards_excess() {
    let mut h = Harness::new(&[(3, 3, Material::Crystal)]);
    h.config.inventory_capacity = 0;
    let mut entity = player(&h, 3, 3);

    h.update(&mut entity);

    assert!(entity.inventory.is_empty());
    assert!(!h.codes().contains(&EventCode::HarvestItem.value()));
    // Experience is still granted for the harvest itself
    assert_eq!(entity.skills.get(SkillKind::Alchemy).exp(), h.config.progression.harvest_xp_scale);
}

#[test]
fn test_full_inventory_discards_matching_drops() {
    let mut h = Harness::new(&[(3, 3, Material::Herb)]);
    h.config.inventory_capacity = 1;
    let mut entity = player(&h, 3, 3);
    assert!(entity.inventory.receive(ItemKind::Potion, 1, &mut h.item_ids));

    h.update(&mut entity);

    assert_eq!(entity.inventory.len(), 1);
    assert_eq!(entity.inventory.items()[0].quantity, 1);
    assert!(!h.codes().contains(&EventCode::HarvestItem.value()));
    assert!(h.map.tile(Position::new(3, 3)).unwrap().depleted);
    assert_eq!(entity.skills.get(SkillKind::Herbalism).exp(), h.config.progression.harvest_xp_scale);
}

#[test]
fn test_starvation_costs_health() {
    let mut h = Harness::new(&[]);
    let mut entity = player(&h, 3, 3);
    entity.resources.food.val = 0;
    let health = entity.resources.health.val;

    h.update(&mut entity);

    assert_eq!(
        entity.resources.health.val,
        health - h.config.resource.starvation_damage
    );
}
