//! Simulation context: everything a system may read or mutate in one frame.
//!
//! The context is owned by the engine and rebuilt on every scene change.

use hecs::{DynamicBundle, Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use birdspace_core::enums::{EntityKind, SceneId, Team};
use birdspace_core::events::SimEvent;
use birdspace_core::types::Position;

use crate::camera::Camera;
use crate::registry::Registry;

pub struct SimContext {
    pub world: World,
    pub registry: Registry,
    /// Sole source of randomness.
    pub rng: ChaCha8Rng,
    pub camera: Camera,
    /// Entity currently receiving input.
    pub controlled: Option<Entity>,
    pub scene: Option<SceneId>,
    /// Events raised since the last snapshot.
    pub events: Vec<SimEvent>,
}

impl SimContext {
    pub fn new(seed: u64, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            world: World::new(),
            registry: Registry::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            camera: Camera::new(viewport_width, viewport_height),
            controlled: None,
            scene: None,
            events: Vec::new(),
        }
    }

    /// Spawn an entity and append it to the registry.
    pub fn spawn(&mut self, bundle: impl DynamicBundle, damageable: bool) -> Entity {
        let entity = self.world.spawn(bundle);
        self.registry.register(entity, damageable);
        entity
    }

    /// Remove an entity from the registry and the world. Removing an entity
    /// twice is a no-op.
    pub fn remove(&mut self, entity: Entity) {
        self.registry.unregister(entity);
        let _ = self.world.despawn(entity);
        if self.controlled == Some(entity) {
            self.controlled = None;
        }
    }

    /// Drop every entity and per-scene reference.
    pub fn clear(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.controlled = None;
        self.events.clear();
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).ok().map(|k| *k)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn team(&self, entity: Entity) -> Option<Team> {
        self.world.get::<&Team>(entity).ok().map(|t| *t)
    }

    pub fn set_position(&mut self, entity: Entity, position: Position) {
        if let Ok(mut p) = self.world.get::<&mut Position>(entity) {
            *p = position;
        }
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

/// Stable external id of an entity.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
