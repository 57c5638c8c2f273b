use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Key into an [`Arena`], packing a slot index with the slot's generation.
///
/// Removing a value bumps its slot's generation, so keys handed out before the
/// removal stop resolving even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArenaKey(NonZeroU64);

static_assertions::assert_eq_size!(ArenaKey, Option<ArenaKey>, u64);

impl ArenaKey {
    pub fn new(generation: u32, idx: u32) -> Self {
        // idx + 1 keeps the packed value non-zero, which gives Option<ArenaKey> a niche.
        let packed = ((generation as u64) << 32) | (idx as u64 + 1);
        Self(NonZeroU64::new(packed).unwrap_or(NonZeroU64::MIN))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        ((self.0.get() & u32::MAX as u64) as u32).wrapping_sub(1)
    }

    /// Raw packed value, stable for the lifetime of the entry.
    pub fn to_bits(&self) -> u64 {
        self.0.get()
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational slot storage.
///
/// Lookups with a stale key return `None` rather than aliasing whatever now
/// occupies the slot.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> ArenaKey {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            ArenaKey::new(slot.generation, idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            ArenaKey::new(0, idx)
        }
    }

    fn slot(&self, key: ArenaKey) -> Option<&Slot<T>> {
        self.slots
            .get(key.index() as usize)
            .filter(|slot| slot.generation == key.generation())
    }

    pub fn get(&self, key: ArenaKey) -> Option<&T> {
        self.slot(key)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: ArenaKey) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub fn contains(&self, key: ArenaKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove the value behind `key`, invalidating every copy of the key.
    pub fn remove(&mut self, key: ArenaKey) -> Option<T> {
        profile_function!();
        let index = key.index();
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArenaKey, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (ArenaKey::new(slot.generation, idx as u32), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ArenaKey, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(idx, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (ArenaKey::new(generation, idx as u32), value))
        })
    }

    /// Snapshot of the live keys, safe to hold across mutations.
    pub fn keys(&self) -> Vec<ArenaKey> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_insert() {
        let mut arena = Arena::<u8>::new();
        let key = arena.insert(15);
        assert_eq!(key.generation(), 0);
        assert_eq!(key.index(), 0);
        assert_eq!(arena.get(key), Some(&15));
    }

    #[test]
    fn test_arena_stale_key() {
        let mut arena = Arena::<u8>::new();
        let _ = arena.insert(15);
        let stale = ArenaKey::new(1, 0);
        assert!(arena.get(stale).is_none());
    }

    #[test]
    fn test_arena_reuses_slot() {
        let mut arena = Arena::<u8>::new();
        let key = arena.insert(15);
        arena.remove(key);
        let new_key = arena.insert(45);
        assert_eq!(key.index(), new_key.index());
        assert_ne!(key.generation(), new_key.generation());
        assert!(arena.get(key).is_none());
        assert_eq!(arena.get(new_key), Some(&45));
    }

    #[test]
    fn test_arena_iter_skips_free() {
        let mut arena = Arena::<u8>::new();
        let keys: Vec<_> = (0..100).map(|i| arena.insert(i)).collect();
        arena.remove(keys[0]);
        arena.remove(keys[1]);
        let collected: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected.len(), 98);
        assert_eq!(collected[0], 2);
        assert_eq!(arena.len(), 98);
    }
}
