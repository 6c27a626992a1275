//! Movement domain: ground detection against the physics world.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;
use crate::physics::{GroundProbe, LocomotionIntegrator};

/// Sphere overlap against the ground layer, ignoring the body's own collider.
pub(crate) struct SpatialGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialGroundProbe<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>, body: Entity) -> Self {
        Self {
            spatial_query,
            // Filter to only hit Ground layer entities (not sensors, other bodies, etc.)
            filter: SpatialQueryFilter::from_mask(GameLayer::Ground).with_excluded_entities([body]),
        }
    }
}

impl GroundProbe for SpatialGroundProbe<'_, '_, '_> {
    fn overlaps_ground(&self, center: Vec3, radius: f32) -> bool {
        !self
            .spatial_query
            .shape_intersections(&Collider::sphere(radius), center, Quat::IDENTITY, &self.filter)
            .is_empty()
    }
}

pub(crate) fn sample_ground(
    spatial_query: SpatialQuery,
    mut bodies: Query<(Entity, &Transform, &mut LocomotionIntegrator)>,
) {
    for (entity, transform, mut body) in &mut bodies {
        let was_grounded = body.is_grounded();
        let probe = SpatialGroundProbe::new(&spatial_query, entity);
        let grounded = body.sample_ground(&probe, transform.translation);

        if grounded && !was_grounded {
            debug!("Landed: velocity={:?}", body.velocity());
        } else if !grounded && was_grounded {
            debug!("Left ground: velocity={:?}", body.velocity());
        }
    }
}
