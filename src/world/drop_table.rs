//! Weighted loot tables returned by harvesting

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::inventory::ItemKind;

/// One possible outcome of a roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub item: ItemKind,
    /// Independent chance this item drops (1.0 = always)
    pub prob: f64,
}

/// An item produced by a roll, at the harvester's tool level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub kind: ItemKind,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    drops: Vec<Drop>,
}

impl DropTable {
    pub fn empty() -> Self {
        Self { drops: Vec::new() }
    }

    pub fn with(mut self, item: ItemKind, prob: f64) -> Self {
        self.drops.push(Drop { item, prob });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    /// Roll every entry once, in table order
    ///
    /// Certain drops skip the RNG so that guaranteed loot does not perturb
    /// the random stream.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, level: u32) -> Vec<ItemDrop> {
        self.drops
            .iter()
            .filter(|drop| drop.prob >= 1.0 || rng.gen::<f64>() < drop.prob)
            .map(|drop| ItemDrop {
                kind: drop.item,
                level,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_certain_drop_always_rolls() {
        let table = DropTable::empty().with(ItemKind::Ration, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drops = table.roll(&mut rng, 3);
        assert_eq!(
            drops,
            vec![ItemDrop {
                kind: ItemKind::Ration,
                level: 3
            }]
        );
    }

    #[test]
    fn test_zero_prob_never_rolls() {
        let table = DropTable::empty().with(ItemKind::Potion, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(table.roll(&mut rng, 1).is_empty());
        }
    }

    #[test]
    fn test_roll_is_deterministic_per_seed() {
        let table = DropTable::empty()
            .with(ItemKind::Potion, 0.5)
            .with(ItemKind::Runes, 0.5);
        let a: Vec<_> = {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            (0..20).map(|_| table.roll(&mut rng, 1)).collect()
        };
        let b: Vec<_> = {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            (0..20).map(|_| table.roll(&mut rng, 1)).collect()
        };
        assert_eq!(a, b);
    }
}
