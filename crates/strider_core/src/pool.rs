//! # Object Pool
//!
//! Named pools of pre-instantiated level objects.
//!
//! Every instance is created when its pool is registered and parked,
//! inactive, at a fixed location. Spawning activates a parked instance;
//! releasing parks it again. Nothing is allocated or dropped while a level
//! is running.

use std::collections::HashMap;

use strider_shared::{Quaternion, Transform, Vec3};

use crate::error::{PoolError, PoolResult};

/// Handle to one pooled instance.
///
/// A handle goes stale once its instance is released. A later spawn into
/// the same slot hands out a new handle, so the stale one never resolves to
/// the new occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceHandle {
    /// Index of the owning pool.
    pool: u32,
    /// Slot inside the owning pool.
    index: u32,
    /// Slot generation at spawn time.
    generation: u32,
}

/// The pool provider seam consumed by level generation.
///
/// Spawn misses are never errors: a provider logs them and returns `None`,
/// and the caller leaves a gap in the level.
pub trait ObjectPoolProvider {
    /// Activates an instance of `name` at the given position and rotation.
    ///
    /// Returns `None` if the pool does not exist or has no free instance.
    fn spawn(&mut self, name: &str, position: Vec3, rotation: Quaternion)
        -> Option<InstanceHandle>;

    /// Returns an instance to the pool it was spawned from.
    fn release(&mut self, name: &str, instance: InstanceHandle);

    /// Returns true if `name` has at least one free instance.
    fn has_available(&self, name: &str) -> bool;

    /// Current world position of an active instance.
    fn position(&self, instance: InstanceHandle) -> Option<Vec3>;

    /// Moves an active instance (children are not moved).
    fn set_position(&mut self, instance: InstanceHandle, position: Vec3);

    /// Attaches `child` under `parent`, detaching it from any previous parent.
    fn set_parent(&mut self, child: InstanceHandle, parent: InstanceHandle);
}

/// One pre-instantiated object.
#[derive(Clone, Debug)]
struct Slot {
    transform: Transform,
    active: bool,
    /// Bumped on every release.
    generation: u32,
    parent: Option<InstanceHandle>,
    children: Vec<InstanceHandle>,
}

/// All instances of one prefab.
struct NamedPool {
    name: String,
    slots: Box<[Slot]>,
    /// Free list - indices of parked slots.
    free_list: Vec<usize>,
}

impl NamedPool {
    fn new(name: String, capacity: usize, parking: Vec3) -> Self {
        let parked = Slot {
            transform: Transform::new(parking, Quaternion::IDENTITY),
            active: false,
            generation: 0,
            parent: None,
            children: Vec::new(),
        };
        let slots: Vec<Slot> = (0..capacity).map(|_| parked.clone()).collect();

        Self {
            name,
            slots: slots.into_boxed_slice(),
            // Reversed so the first spawn hands out slot 0.
            free_list: (0..capacity).rev().collect(),
        }
    }

    fn active_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

/// A registry of named object pools.
///
/// # Thread Safety
///
/// Not thread-safe. The pool is owned by the level sequencer and touched
/// only from the frame loop.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = ObjectPool::new(Vec3::new(0.0, -100.0, 0.0));
/// pool.register("Coin", 64)?;
///
/// let coin = pool.spawn("Coin", Vec3::new(0.0, 2.0, 10.0), Quaternion::IDENTITY);
/// assert!(coin.is_some());
/// ```
pub struct ObjectPool {
    pools: Vec<NamedPool>,
    by_name: HashMap<String, usize>,
    /// Where parked instances wait.
    parking: Vec3,
}

impl ObjectPool {
    /// Creates an empty registry that parks inactive instances at `parking`.
    #[must_use]
    pub fn new(parking: Vec3) -> Self {
        Self {
            pools: Vec::new(),
            by_name: HashMap::new(),
            parking,
        }
    }

    /// Registers a pool and pre-instantiates `capacity` instances.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DuplicatePool`] if the name is taken and
    /// [`PoolError::ZeroCapacity`] for an empty pool.
    pub fn register(&mut self, name: &str, capacity: usize) -> PoolResult<()> {
        if self.by_name.contains_key(name) {
            return Err(PoolError::DuplicatePool(name.to_owned()));
        }
        if capacity == 0 {
            return Err(PoolError::ZeroCapacity(name.to_owned()));
        }

        self.by_name.insert(name.to_owned(), self.pools.len());
        self.pools
            .push(NamedPool::new(name.to_owned(), capacity, self.parking));
        tracing::debug!("registered pool {name} with {capacity} instances");
        Ok(())
    }

    /// Total instances in a pool, or `None` for an unknown name.
    #[must_use]
    pub fn capacity(&self, name: &str) -> Option<usize> {
        self.pool(name).map(|p| p.slots.len())
    }

    /// Spawned instances in a pool, or `None` for an unknown name.
    #[must_use]
    pub fn active_count(&self, name: &str) -> Option<usize> {
        self.pool(name).map(NamedPool::active_count)
    }

    /// Spawned instances across every pool.
    #[must_use]
    pub fn total_active(&self) -> usize {
        self.pools.iter().map(NamedPool::active_count).sum()
    }

    /// Returns true if the instance is currently spawned.
    #[must_use]
    pub fn is_active(&self, instance: InstanceHandle) -> bool {
        self.slot(instance).is_some_and(|s| s.active)
    }

    /// Name of the pool an instance belongs to.
    #[must_use]
    pub fn name_of(&self, instance: InstanceHandle) -> Option<&str> {
        self.pools
            .get(instance.pool as usize)
            .map(|p| p.name.as_str())
    }

    /// Current parent of an instance.
    #[must_use]
    pub fn parent_of(&self, instance: InstanceHandle) -> Option<InstanceHandle> {
        self.slot(instance).and_then(|s| s.parent)
    }

    /// Instances attached under `parent`.
    #[must_use]
    pub fn children_of(&self, parent: InstanceHandle) -> &[InstanceHandle] {
        self.slot(parent)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    /// Moves an instance and everything attached under it.
    pub fn translate(&mut self, instance: InstanceHandle, delta: Vec3) {
        let mut stack = vec![instance];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.slot_mut(current) {
                slot.transform.position += delta;
                stack.extend_from_slice(&slot.children);
            }
        }
    }

    /// Releases every child of `parent` back to its own pool.
    ///
    /// Returns the number of instances released.
    pub fn release_children(&mut self, parent: InstanceHandle) -> usize {
        let children = match self.slot_mut(parent) {
            Some(slot) => std::mem::take(&mut slot.children),
            None => return 0,
        };

        let mut released = 0;
        for child in children {
            if let Some(slot) = self.slot_mut(child) {
                // Already detached above; keep release from touching the parent.
                slot.parent = None;
            }
            if self.release_handle(child) {
                released += 1;
            }
        }
        released
    }

    fn pool(&self, name: &str) -> Option<&NamedPool> {
        self.by_name.get(name).map(|&i| &self.pools[i])
    }

    fn slot(&self, instance: InstanceHandle) -> Option<&Slot> {
        self.pools
            .get(instance.pool as usize)?
            .slots
            .get(instance.index as usize)
            .filter(|s| s.generation == instance.generation)
    }

    fn slot_mut(&mut self, instance: InstanceHandle) -> Option<&mut Slot> {
        self.pools
            .get_mut(instance.pool as usize)?
            .slots
            .get_mut(instance.index as usize)
            .filter(|s| s.generation == instance.generation)
    }

    fn detach(&mut self, child: InstanceHandle) {
        let Some(parent) = self.slot_mut(child).and_then(|s| s.parent.take()) else {
            return;
        };
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.retain(|&c| c != child);
        }
    }

    /// Parks an active instance. Returns false if it was not active.
    fn release_handle(&mut self, instance: InstanceHandle) -> bool {
        if !self.is_active(instance) {
            return false;
        }
        self.detach(instance);

        let parking = self.parking;
        let mut orphans = Vec::new();
        if let Some(slot) = self.slot_mut(instance) {
            slot.active = false;
            slot.generation = slot.generation.wrapping_add(1);
            slot.transform = Transform::new(parking, Quaternion::IDENTITY);
            orphans = std::mem::take(&mut slot.children);
        }
        for orphan in orphans {
            if let Some(slot) = self.slot_mut(orphan) {
                slot.parent = None;
            }
        }

        self.pools[instance.pool as usize]
            .free_list
            .push(instance.index as usize);
        true
    }
}

impl ObjectPoolProvider for ObjectPool {
    #[allow(clippy::cast_possible_truncation)]
    fn spawn(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quaternion,
    ) -> Option<InstanceHandle> {
        let Some(&pool_index) = self.by_name.get(name) else {
            tracing::warn!("pool with name {name} doesn't exist");
            return None;
        };

        let pool = &mut self.pools[pool_index];
        let Some(index) = pool.free_list.pop() else {
            tracing::warn!("no objects available in pool {name}");
            return None;
        };

        let slot = &mut pool.slots[index];
        slot.active = true;
        slot.transform = Transform::new(position, rotation);

        Some(InstanceHandle {
            pool: pool_index as u32,
            index: index as u32,
            generation: slot.generation,
        })
    }

    fn release(&mut self, name: &str, instance: InstanceHandle) {
        let Some(&pool_index) = self.by_name.get(name) else {
            tracing::warn!("release: pool with name {name} doesn't exist");
            return;
        };
        if pool_index != instance.pool as usize {
            tracing::warn!("release: instance {instance:?} does not belong to pool {name}");
            return;
        }
        if !self.release_handle(instance) {
            tracing::warn!("release: instance {instance:?} of pool {name} is not active");
        }
    }

    fn has_available(&self, name: &str) -> bool {
        self.pool(name).is_some_and(|p| !p.free_list.is_empty())
    }

    fn position(&self, instance: InstanceHandle) -> Option<Vec3> {
        self.slot(instance)
            .filter(|s| s.active)
            .map(|s| s.transform.position)
    }

    fn set_position(&mut self, instance: InstanceHandle, position: Vec3) {
        if let Some(slot) = self.slot_mut(instance) {
            slot.transform.position = position;
        }
    }

    fn set_parent(&mut self, child: InstanceHandle, parent: InstanceHandle) {
        if child == parent || self.slot(parent).is_none() || self.slot(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(slot) = self.slot_mut(child) {
            slot.parent = Some(parent);
        }
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(child);
        }
    }
}
