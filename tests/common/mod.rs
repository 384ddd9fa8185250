#![allow(dead_code)]

use realm_core::core::config::RealmConfig;
use realm_core::world::material::Material;
use realm_core::world::terrain::RawTerrain;
use realm_core::Realm;

/// Square map with `border` tiles of padding around a `center`-wide play area
pub fn config(center: usize, border: usize) -> RealmConfig {
    let mut config = RealmConfig::default();
    config.map.center = center;
    config.map.border = border;
    config.map.size = center + 2 * border;
    config.map.vision_radius = border.saturating_sub(1);
    config.map.reset_from_fractal = false;
    config
}

/// Players only, on an all-grass map
pub fn grass_realm(player_n: usize) -> Realm {
    let mut config = config(16, 2);
    config.population.player_n = player_n;
    config.population.npc_enabled = false;
    let raw = RawTerrain::flat(config.map.size, Material::Grass);

    let mut realm = Realm::new(config).expect("valid config");
    realm
        .reset(&raw, &realm_core::world::terrain::FractalTerrain)
        .expect("reset");
    realm
}

/// Generated terrain with both populations
pub fn busy_realm(seed: u64) -> Realm {
    use rand::SeedableRng;

    let mut config = config(24, 4);
    config.seed = seed;
    config.map.reset_from_fractal = true;
    config.population.player_n = 6;
    config.population.npc_n = 12;
    config.population.npc_spawn_attempts = 16;

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let raw = RawTerrain::noise(config.map.size, &mut rng);

    let mut realm = Realm::new(config).expect("valid config");
    realm
        .reset(&raw, &realm_core::world::terrain::FractalTerrain)
        .expect("reset");
    realm
}
