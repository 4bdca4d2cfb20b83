use std::collections::HashSet;

use crate::foundation::core::{ObjectId, Point, Viewport};
use crate::foundation::error::FolioResult;
use crate::scene::model::Scene;

/// One pick result.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Hit {
    /// Object whose collider the ray entered.
    pub object: ObjectId,
    /// Its name, as the hover and click handlers match on names.
    pub name: String,
    /// Distance from the camera along the ray.
    pub distance: f64,
}

/// Ray picker over the scene's interactive set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Picker;

impl Picker {
    /// Everything under `pointer` (viewport pixels), nearest first.
    ///
    /// Only colliders inside registered interactive subtrees are tested, each at most once, and
    /// hidden subtrees are skipped. An empty list means nothing is under the pointer.
    pub fn pick(scene: &Scene, viewport: Viewport, pointer: Point) -> FolioResult<Vec<Hit>> {
        let ndc = viewport.to_ndc(pointer);
        let ray = scene.camera.ray_through(ndc);

        let mut hits = Vec::new();
        // Roots registered inside another root's subtree are visited once.
        let mut seen = HashSet::new();
        for root in scene.interactive() {
            for id in scene.subtree(*root)? {
                if !seen.insert(id) {
                    continue;
                }
                let obj = scene.get(id)?;
                let Some(collider) = obj.collider else {
                    continue;
                };
                if !scene.is_shown(id)? {
                    continue;
                }
                let world = scene.world_affine(id)?;
                if let Some(distance) = collider.intersect_placed(&world, &ray) {
                    hits.push(Hit {
                        object: id,
                        name: obj.name().to_owned(),
                        distance,
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(hits)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/picking.rs"]
mod tests;
