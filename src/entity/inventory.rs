//! Minimal item model: harvest products, tools and a bounded inventory
//!
//! Item definitions proper (stats, prices, use effects) live outside the
//! simulation core; only what harvesting and the item table need is here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ItemKind {
    Ration = 1,
    Potion = 2,
    Whetstone = 3,
    Arrow = 4,
    Runes = 5,
    Rod = 6,
    Gloves = 7,
    Pickaxe = 8,
    Axe = 9,
    Chisel = 10,
}

impl ItemKind {
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

/// Tools that scale harvest drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Rod,
    Gloves,
    Pickaxe,
    Axe,
    Chisel,
}

impl ToolKind {
    pub fn item_kind(&self) -> ItemKind {
        match self {
            ToolKind::Rod => ItemKind::Rod,
            ToolKind::Gloves => ItemKind::Gloves,
            ToolKind::Pickaxe => ItemKind::Pickaxe,
            ToolKind::Axe => ItemKind::Axe,
            ToolKind::Chisel => ItemKind::Chisel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub level: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub held: Option<Tool>,
}

impl Equipment {
    /// Level of the held tool if it matches `kind`, else 1
    pub fn tool_level(&self, kind: Option<ToolKind>) -> u32 {
        match (self.held, kind) {
            (Some(tool), Some(kind)) if tool.kind == kind => tool.level,
            _ => 1,
        }
    }
}

/// Allocates item ids, unique within an episode
#[derive(Debug, Clone, Default)]
pub struct ItemIds {
    next: u32,
}

impl ItemIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next.max(1);
        self.next = id + 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub level: u32,
    pub quantity: u32,
}

/// Items stack by (kind, level); each stack takes one slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A free slot remains
    pub fn space(&self) -> bool {
        self.items.len() < self.capacity
    }

    /// Store one item. Returns false when it had to be discarded.
    ///
    /// A full inventory discards everything, including drops that would
    /// only grow an existing stack.
    pub fn receive(&mut self, kind: ItemKind, level: u32, ids: &mut ItemIds) -> bool {
        if !self.space() {
            return false;
        }

        if let Some(stack) = self
            .items
            .iter_mut()
            .find(|item| item.kind == kind && item.level == level)
        {
            stack.quantity += 1;
            return true;
        }

        self.items.push(Item {
            id: ids.next_id(),
            kind,
            level,
            quantity: 1,
        });
        true
    }

    /// Destroy everything held, returning what was removed
    pub fn destroy_all(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacking_does_not_use_slots() {
        let mut ids = ItemIds::new();
        let mut inv = Inventory::new(2);
        assert!(inv.receive(ItemKind::Ration, 1, &mut ids));
        assert!(inv.receive(ItemKind::Ration, 1, &mut ids));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.items()[0].quantity, 2);
        assert!(inv.space());
    }

    #[test]
    fn test_full_inventory_discards_matching_stack() {
        let mut ids = ItemIds::new();
        let mut inv = Inventory::new(1);
        assert!(inv.receive(ItemKind::Ration, 1, &mut ids));
        assert!(!inv.receive(ItemKind::Ration, 1, &mut ids));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.items()[0].quantity, 1);
    }

    #[test]
    fn test_full_inventory_discards() {
        let mut ids = ItemIds::new();
        let mut inv = Inventory::new(1);
        assert!(inv.receive(ItemKind::Ration, 1, &mut ids));
        assert!(!inv.space());
        assert!(!inv.receive(ItemKind::Potion, 1, &mut ids));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_item_ids_are_sequential() {
        let mut ids = ItemIds::new();
        let mut inv = Inventory::new(4);
        inv.receive(ItemKind::Ration, 1, &mut ids);
        inv.receive(ItemKind::Potion, 1, &mut ids);
        inv.receive(ItemKind::Potion, 2, &mut ids);
        let got: Vec<u32> = inv.items().iter().map(|i| i.id).collect();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn test_tool_level_requires_matching_tool() {
        let mut equipment = Equipment::default();
        assert_eq!(equipment.tool_level(Some(ToolKind::Rod)), 1);

        equipment.held = Some(Tool {
            kind: ToolKind::Rod,
            level: 4,
        });
        assert_eq!(equipment.tool_level(Some(ToolKind::Rod)), 4);
        assert_eq!(equipment.tool_level(Some(ToolKind::Axe)), 1);
        assert_eq!(equipment.tool_level(None), 1);
    }

    #[test]
    fn test_destroy_all_empties() {
        let mut ids = ItemIds::new();
        let mut inv = Inventory::new(4);
        inv.receive(ItemKind::Runes, 1, &mut ids);
        let removed = inv.destroy_all();
        assert_eq!(removed.len(), 1);
        assert!(inv.is_empty());
    }
}
