use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Slot index with generation tracking to prevent stale references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct GenerationalId {
    pub index: usize,
    pub generation: u32,
}

impl GenerationalId {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Typed handle into an [`Arena`]. Implemented by every id kind the engine hands out.
pub trait ArenaKey: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    fn from_raw(raw: GenerationalId) -> Self;
    fn raw(self) -> GenerationalId;

    fn index(self) -> usize {
        self.raw().index
    }

    fn generation(self) -> u32 {
        self.raw().generation
    }
}

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        pub struct $name(pub GenerationalId);

        impl $name {
            pub fn new(index: usize, generation: u32) -> Self {
                Self(GenerationalId::new(index, generation))
            }
        }

        impl ArenaKey for $name {
            fn from_raw(raw: GenerationalId) -> Self {
                Self(raw)
            }

            fn raw(self) -> GenerationalId {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}v{}", stringify!($name), self.0.index, self.0.generation)
            }
        }
    };
}

arena_key!(
    /// Identifier of a point-mass inside a structure or vehicle arena.
    PointId
);
arena_key!(
    /// Identifier of a link inside a structure or vehicle arena.
    LinkId
);

/// Generational arena that hands out stable ids while preventing use-after-free.
///
/// Iteration follows insertion order, independent of slot reuse, so solvers
/// walking the arena visit elements deterministically.
#[derive(Debug, Clone)]
pub struct Arena<K: ArenaKey, T> {
    items: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    order: Vec<usize>,
    _key: PhantomData<K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            _key: PhantomData,
        }
    }

    pub fn insert(&mut self, item: T) -> K {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index];
            self.items[index] = Some(item);
            self.order.push(index);
            return K::from_raw(GenerationalId::new(index, generation));
        }

        let index = self.items.len();
        self.items.push(Some(item));
        self.generations.push(0);
        self.order.push(index);
        K::from_raw(GenerationalId::new(index, 0))
    }

    pub fn get(&self, id: K) -> Option<&T> {
        if self.is_valid(id) {
            self.items.get(id.index()).and_then(|slot| slot.as_ref())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        if self.is_valid(id) {
            self.items.get_mut(id.index()).and_then(|slot| slot.as_mut())
        } else {
            None
        }
    }

    /// Borrows two distinct elements mutably. Returns `None` if either id is stale
    /// or both ids refer to the same slot.
    pub fn get2_mut(&mut self, id_a: K, id_b: K) -> Option<(&mut T, &mut T)> {
        if id_a.index() == id_b.index() {
            return None;
        }

        if !self.is_valid(id_a) || !self.is_valid(id_b) {
            return None;
        }

        let (first, second, flipped) = if id_a.index() < id_b.index() {
            (id_a, id_b, false)
        } else {
            (id_b, id_a, true)
        };

        let (left, right) = self.items.split_at_mut(second.index());
        let first_slot = left.get_mut(first.index()).and_then(|slot| slot.as_mut())?;
        let second_slot = right.get_mut(0).and_then(|slot| slot.as_mut())?;

        if flipped {
            Some((second_slot, first_slot))
        } else {
            Some((first_slot, second_slot))
        }
    }

    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: K) -> Option<T> {
        if !self.is_valid(id) {
            return None;
        }
        let slot = self.items.get_mut(id.index())?;
        let item = slot.take()?;
        self.generations[id.index()] = self.generations[id.index()].wrapping_add(1);
        self.free_list.push(id.index());
        self.order.retain(|&index| index != id.index());
        Some(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order
            .iter()
            .filter_map(move |&index| self.items[index].as_ref())
    }

    /// Iterates `(id, item)` pairs in insertion order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.order.iter().filter_map(move |&index| {
            self.items[index]
                .as_ref()
                .map(|item| (K::from_raw(GenerationalId::new(index, self.generations[index])), item))
        })
    }

    /// Mutable access to every live element. Visits slots in storage order, which
    /// only differs from insertion order after a removed slot has been reused.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items.iter_mut().filter_map(|slot| slot.as_mut())
    }

    /// Visits every live element mutably in insertion order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut T),
    {
        for &index in &self.order {
            if let Some(item) = self.items[index].as_mut() {
                f(K::from_raw(GenerationalId::new(index, self.generations[index])), item);
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.order
            .iter()
            .map(move |&index| K::from_raw(GenerationalId::new(index, self.generations[index])))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn is_valid(&self, id: K) -> bool {
        self.generations
            .get(id.index())
            .copied()
            .map(|gen| gen == id.generation())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ids_are_rejected_after_reuse() {
        let mut arena: Arena<PointId, u32> = Arena::new();
        let first = arena.insert(1);
        assert_eq!(arena.remove(first), Some(1));

        let second = arena.insert(2);
        assert_eq!(second.index(), first.index());
        assert_ne!(second.generation(), first.generation());
        assert!(arena.get(first).is_none());
        assert!(arena.remove(first).is_none());
        assert_eq!(arena.get(second), Some(&2));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut arena: Arena<LinkId, &str> = Arena::new();
        let a = arena.insert("a");
        arena.insert("b");
        arena.remove(a);
        arena.insert("c");

        let visited: Vec<&str> = arena.iter().copied().collect();
        assert_eq!(visited, ["b", "c"]);

        let mut order = Vec::new();
        arena.for_each_mut(|_, item| order.push(*item));
        assert_eq!(order, ["b", "c"]);
    }

    #[test]
    fn get2_mut_refuses_aliasing() {
        let mut arena: Arena<PointId, i32> = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        assert!(arena.get2_mut(a, a).is_none());

        let (x, y) = arena.get2_mut(b, a).unwrap();
        std::mem::swap(x, y);
        assert_eq!(arena.get(a), Some(&2));
        assert_eq!(arena.get(b), Some(&1));
    }
}
