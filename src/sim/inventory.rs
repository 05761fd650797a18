//! Inventory slots and powerup effects

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects;
use super::state::{GameEvent, GameState};
use crate::consts::INVENTORY_SLOTS;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    HealthPotion,
    SwordUpgrade,
    Armor,
    TimeFreeze,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::HealthPotion,
        PowerupKind::SwordUpgrade,
        PowerupKind::Armor,
        PowerupKind::TimeFreeze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerupKind::HealthPotion => "Health Potion",
            PowerupKind::SwordUpgrade => "Sword Upgrade",
            PowerupKind::Armor => "Armor",
            PowerupKind::TimeFreeze => "Time Freeze",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Display color
    pub fn color(&self) -> u32 {
        match self {
            PowerupKind::HealthPotion => 0x00FF00,
            PowerupKind::SwordUpgrade => 0xFFD700,
            PowerupKind::Armor => 0x00FFFF,
            PowerupKind::TimeFreeze => 0xADD8E6,
        }
    }
}

/// Fixed slot store; items go into the first empty slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<PowerupKind>; INVENTORY_SLOTS],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `kind` in the first empty slot; `None` when full
    pub fn add(&mut self, kind: PowerupKind) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(kind);
        Some(slot)
    }

    pub fn get(&self, slot: usize) -> Option<PowerupKind> {
        self.slots.get(slot).copied().flatten()
    }

    /// Empty a slot, returning what was in it
    pub fn take(&mut self, slot: usize) -> Option<PowerupKind> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn slots(&self) -> &[Option<PowerupKind>; INVENTORY_SLOTS] {
        &self.slots
    }

    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// First slot holding `kind`
    pub fn find(&self, kind: PowerupKind) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(kind))
    }
}

/// Health potion heal particles
const POTION_COLOR: u32 = 0x00FF00;

/// Apply a powerup to the run; returns whether it took effect
pub fn apply_effect(kind: PowerupKind, state: &mut GameState) -> bool {
    match kind {
        PowerupKind::HealthPotion => {
            let heal = state.tuning.potion_heal;
            state.player.heal(heal);
            let pos = state.player.pos;
            state.particles.spawn(pos, POTION_COLOR, 20);
        }
        PowerupKind::SwordUpgrade => effects::apply_sword_upgrade(state),
        PowerupKind::Armor => effects::apply_armor(state),
        PowerupKind::TimeFreeze => effects::apply_freeze(state),
    }
    true
}

/// Use the item in `slot`. The slot is only cleared if the effect succeeds.
pub fn use_slot(state: &mut GameState, slot: usize) -> bool {
    if slot >= INVENTORY_SLOTS {
        log::warn!("Ignoring use of invalid inventory slot {slot}");
        return false;
    }
    let Some(kind) = state.inventory.get(slot) else {
        return false;
    };
    if !apply_effect(kind, state) {
        return false;
    }
    state.inventory.take(slot);
    log::debug!("Used {} from slot {slot}", kind.name());
    state.emit(GameEvent::PowerupUsed { kind });
    true
}

/// Roll for a kill drop; a full inventory silently discards it
pub fn roll_drop(state: &mut GameState) -> Option<usize> {
    let chance = state.tuning.drop_chance;
    if state.rng().random::<f32>() >= chance {
        return None;
    }
    let kind = PowerupKind::ALL[state.rng().random_range(0..PowerupKind::ALL.len())];
    match state.inventory.add(kind) {
        Some(slot) => {
            log::debug!("{} dropped into slot {slot}", kind.name());
            state.emit(GameEvent::PowerupDropped { kind, slot });
            Some(slot)
        }
        None => {
            log::debug!("Inventory full, discarding {}", kind.name());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(9, Vec2::new(800.0, 600.0), Tuning::default(), 0)
    }

    #[test]
    fn test_add_fills_first_empty_slot() {
        let mut inv = Inventory::new();
        assert_eq!(inv.add(PowerupKind::Armor), Some(0));
        assert_eq!(inv.add(PowerupKind::TimeFreeze), Some(1));
        inv.take(0);
        assert_eq!(inv.add(PowerupKind::HealthPotion), Some(0));
        assert_eq!(inv.get(0), Some(PowerupKind::HealthPotion));
    }

    #[test]
    fn test_full_inventory_rejects() {
        let mut inv = Inventory::new();
        for _ in 0..INVENTORY_SLOTS {
            assert!(inv.add(PowerupKind::Armor).is_some());
        }
        assert!(inv.is_full());
        assert_eq!(inv.add(PowerupKind::HealthPotion), None);
        assert_eq!(inv.count(), INVENTORY_SLOTS);
    }

    #[test]
    fn test_use_potion_heals_and_clears_slot() {
        let mut s = state();
        s.player.health = 50.0;
        s.inventory.add(PowerupKind::HealthPotion);
        assert!(use_slot(&mut s, 0));
        assert_eq!(s.player.health, 80.0);
        assert_eq!(s.inventory.get(0), None);

        // Heal never exceeds max
        s.player.health = 90.0;
        s.inventory.add(PowerupKind::HealthPotion);
        use_slot(&mut s, 0);
        assert_eq!(s.player.health, 100.0);
    }

    #[test]
    fn test_use_empty_or_invalid_slot() {
        let mut s = state();
        assert!(!use_slot(&mut s, 2));
        assert!(!use_slot(&mut s, 99));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_names_round_trip_registry() {
        for kind in PowerupKind::ALL {
            assert_eq!(PowerupKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PowerupKind::from_name("Mega Sword"), None);
    }

    #[test]
    fn test_guaranteed_drop_lands_in_inventory() {
        let mut s = state();
        s.tuning.drop_chance = 1.0;
        assert_eq!(roll_drop(&mut s), Some(0));
        assert_eq!(s.inventory.count(), 1);
    }
}
