//! # Scene Registry
//!
//! The host side of [`WorldHost`]: every entity the window creates lands
//! here, split by layer, until the window destroys it.

use std::collections::HashMap;

use sylvan_procedural::{EntityId, LayerHint, SpawnedEntity, WorldEntity, WorldHost};

/// Live entities, keyed by id, one map per layer.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    background: HashMap<EntityId, SpawnedEntity>,
    solid: HashMap<EntityId, SpawnedEntity>,
    cell_size: f32,
    evicted: Vec<EntityId>,
}

impl SceneRegistry {
    /// Creates an empty registry. `cell_size` resolves terrain bounds.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    fn layer(&self, layer: LayerHint) -> &HashMap<EntityId, SpawnedEntity> {
        match layer {
            LayerHint::Background => &self.background,
            LayerHint::Solid => &self.solid,
        }
    }

    fn layer_mut(&mut self, layer: LayerHint) -> &mut HashMap<EntityId, SpawnedEntity> {
        match layer {
            LayerHint::Background => &mut self.background,
            LayerHint::Solid => &mut self.solid,
        }
    }

    /// Total live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.background.len() + self.solid.len()
    }

    /// True when nothing is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entities on one layer.
    #[must_use]
    pub fn layer_len(&self, layer: LayerHint) -> usize {
        self.layer(layer).len()
    }

    /// Looks up a live entity on either layer.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&SpawnedEntity> {
        self.solid.get(&id).or_else(|| self.background.get(&id))
    }

    /// True if `id` is live.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// A live fruit whose bounds contain the point.
    #[must_use]
    pub fn fruit_at(&self, x: f32, y: f32) -> Option<&SpawnedEntity> {
        self.solid.values().find(|spawned| {
            matches!(spawned.entity, WorldEntity::Fruit(_))
                && spawned.entity.bounds(self.cell_size).contains(x, y)
        })
    }

    /// Ids destroyed since the last call, in destruction order.
    pub fn take_evicted(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.evicted)
    }
}

impl WorldHost for SceneRegistry {
    fn on_entity_created(&mut self, entity: &SpawnedEntity, layer: LayerHint) {
        if self.layer_mut(layer).insert(entity.id, *entity).is_some() {
            tracing::warn!(id = entity.id.0, "entity created twice; replaced");
        }
    }

    fn on_entity_destroyed(&mut self, entity: &SpawnedEntity, layer: LayerHint) {
        if self.layer_mut(layer).remove(&entity.id).is_none() {
            tracing::warn!(
                id = entity.id.0,
                kind = entity.entity.kind(),
                "destroy for unknown entity ignored"
            );
            return;
        }
        self.evicted.push(entity.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylvan_procedural::{CanopySlot, Foliage, Fruit, FruitColor, Rgb, TerrainCell};

    fn fruit(id: u64, x: f32, y: f32) -> SpawnedEntity {
        SpawnedEntity {
            id: EntityId(id),
            entity: WorldEntity::Fruit(Fruit {
                trunk_x: 0.0,
                slot: CanopySlot { column: 0, row: -1 },
                x,
                y,
                size: 30.0,
                color: FruitColor::Orange,
            }),
        }
    }

    fn leaf(id: u64) -> SpawnedEntity {
        SpawnedEntity {
            id: EntityId(id),
            entity: WorldEntity::Foliage(Foliage {
                trunk_x: 0.0,
                slot: CanopySlot { column: 1, row: 0 },
                x: 30.0,
                y: 400.0,
                size: 30.0,
                phase: 0.25,
            }),
        }
    }

    fn insert(scene: &mut SceneRegistry, entity: SpawnedEntity) {
        scene.on_entity_created(&entity, entity.layer());
    }

    #[test]
    fn test_layers_are_separate() {
        let mut scene = SceneRegistry::new(30.0);
        insert(&mut scene, leaf(1));
        insert(&mut scene, fruit(2, 0.0, 300.0));
        let cell = SpawnedEntity {
            id: EntityId(3),
            entity: WorldEntity::Terrain(TerrainCell {
                grid_x: 0,
                grid_y: 20,
                style: Rgb::GROUND,
            }),
        };
        insert(&mut scene, cell);

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.layer_len(LayerHint::Background), 1);
        assert_eq!(scene.layer_len(LayerHint::Solid), 2);
        assert!(scene.contains(EntityId(1)));
        assert_eq!(scene.get(EntityId(3)), Some(&cell));
    }

    #[test]
    fn test_fruit_lookup() {
        let mut scene = SceneRegistry::new(30.0);
        insert(&mut scene, fruit(7, 60.0, 300.0));
        insert(&mut scene, leaf(8));

        assert_eq!(scene.fruit_at(75.0, 310.0).map(|f| f.id), Some(EntityId(7)));
        assert!(scene.fruit_at(45.0, 410.0).is_none(), "foliage is not fruit");
        assert!(scene.fruit_at(200.0, 200.0).is_none());
    }

    #[test]
    fn test_destroy_records_eviction() {
        let mut scene = SceneRegistry::new(30.0);
        let f = fruit(1, 0.0, 0.0);
        insert(&mut scene, f);
        scene.on_entity_destroyed(&f, f.layer());

        assert!(scene.is_empty());
        assert_eq!(scene.take_evicted(), vec![EntityId(1)]);
        assert!(scene.take_evicted().is_empty());
    }

    #[test]
    fn test_unknown_destroy_is_ignored() {
        let mut scene = SceneRegistry::new(30.0);
        let f = fruit(9, 0.0, 0.0);
        scene.on_entity_destroyed(&f, f.layer());
        assert!(scene.is_empty());
        assert!(scene.take_evicted().is_empty());
    }
}
