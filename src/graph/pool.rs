//! Fixed-capacity generational slot pools.
//!
//! Gates and wires live in flat pools and refer to each other only by
//! handle. A handle carries the generation of the slot it was issued for;
//! freeing a slot bumps the generation, so a handle captured before a
//! free/reuse is detected as stale instead of silently aliasing whatever
//! now occupies the slot.

use std::fmt;
use std::marker::PhantomData;

/// Typed handle into a [`Pool`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: derives would put unwanted bounds on T.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Handle<T> {}
impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}
impl<T> Eq for Handle<T> {}
impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}
impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

impl<T> Handle<T> {
    /// Slot index, stable for the lifetime of the entity. Used for
    /// deterministic iteration-order tie-breaks, never for dereferencing.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Error returned when a pool refuses an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The pool is at capacity; nothing was allocated.
    CapacityExceeded { capacity: usize },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::CapacityExceeded { capacity } => {
                write!(f, "pool is full ({} slots)", capacity)
            }
        }
    }
}

impl std::error::Error for PoolError {}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity pool with slot reuse and generation tagging.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    capacity: usize,
    len: usize,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            capacity,
            len: 0,
        }
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a value, reusing a freed slot when one exists.
    pub fn insert(&mut self, value: T) -> Result<Handle<T>, PoolError> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.slots.len() >= self.capacity {
                    return Err(PoolError::CapacityExceeded {
                        capacity: self.capacity,
                    });
                }
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.len += 1;
        Ok(Handle {
            index,
            generation: slot.generation,
            _marker: PhantomData,
        })
    }

    /// Free a slot, invalidating every copy of its handle.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Liveness check: true only for the handle issued by the slot's
    /// current occupancy.
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Active entries in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    Handle {
                        index: index as u32,
                        generation: slot.generation,
                        _marker: PhantomData,
                    },
                    value,
                )
            })
        })
    }

    /// Free every slot whose value fails the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let drop_it = matches!(&slot.value, Some(value) if !keep(value));
            if drop_it {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                self.len -= 1;
            }
        }
    }
}
