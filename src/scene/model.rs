use std::collections::HashMap;

use crate::foundation::core::{DAffine3, DQuat, DVec2, DVec3, EulerRot, ObjectId, Rgb, Transform3D};
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::{Aabb, Ray};

/// Flat surface colour of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    /// Base colour.
    pub color: Rgb,
}

/// One node of the scene graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneObject {
    name: String,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    /// Transform relative to the parent (or the world for roots).
    pub transform: Transform3D,
    /// Surface colour, if the node is a mesh.
    pub material: Option<Material>,
    /// Local-space hit box used by the picker.
    pub collider: Option<Aabb>,
    /// Hidden nodes (and their subtrees) are not picked.
    pub visible: bool,
}

impl SceneObject {
    /// Visible node with an identity transform and nothing attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform3D::default(),
            material: None,
            collider: None,
            visible: true,
        }
    }

    /// Replace the local transform.
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Attach a flat material.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.material = Some(Material { color });
        self
    }

    /// Attach a local-space collider.
    pub fn with_collider(mut self, collider: Aabb) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Unique node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for roots.
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}

/// Perspective camera looking down its local -Z axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Camera {
    /// World position.
    pub position: DVec3,
    /// Euler angles in radians (XYZ).
    pub rotation: DVec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Width / height of the viewport.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::new(1.3, 1.0, 4.0),
            rotation: DVec3::ZERO,
            fov_deg: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    fn orientation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    fn half_height(&self) -> f64 {
        (self.fov_deg.to_radians() * 0.5).tan()
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: DVec2) -> Ray {
        let h = self.half_height();
        let local = DVec3::new(ndc.x * h * self.aspect, ndc.y * h, -1.0);
        Ray::new(self.position, self.orientation() * local)
    }

    /// Normalized device coordinates of a world point, `None` when it is behind the camera.
    pub fn project(&self, world: DVec3) -> Option<DVec2> {
        let local = self.orientation().inverse() * (world - self.position);
        if local.z >= 0.0 {
            return None;
        }
        let depth = -local.z;
        let h = self.half_height();
        Some(DVec2::new(
            local.x / (depth * h * self.aspect),
            local.y / (depth * h),
        ))
    }
}

/// Arena of scene objects plus the camera and the pickable set.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    by_name: HashMap<String, ObjectId>,
    interactive: Vec<ObjectId>,
    /// The rendering camera.
    pub camera: Camera,
}

impl Scene {
    /// Empty scene with the default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene viewed through `camera`.
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// Insert `object` under `parent` (or as a root). Names must be unique.
    pub fn spawn(&mut self, mut object: SceneObject, parent: Option<ObjectId>) -> FolioResult<ObjectId> {
        if self.by_name.contains_key(&object.name) {
            return Err(FolioError::scene(format!(
                "object '{}' already exists",
                object.name
            )));
        }
        if let Some(p) = parent {
            self.get(p)?;
        }
        let id = ObjectId(u32::try_from(self.objects.len()).map_err(|_| {
            FolioError::scene("scene object arena is full")
        })?);
        object.parent = parent;
        object.children.clear();
        self.by_name.insert(object.name.clone(), id);
        self.objects.push(object);
        if let Some(p) = parent {
            self.objects[p.index()].children.push(id);
        }
        Ok(id)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` when nothing has been spawned.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every object with its id, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        (0u32..).zip(self.objects.iter()).map(|(i, obj)| (ObjectId(i), obj))
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> FolioResult<&SceneObject> {
        self.objects
            .get(id.index())
            .ok_or_else(|| FolioError::scene(format!("unknown object id {}", id.0)))
    }

    /// Look up an object mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> FolioResult<&mut SceneObject> {
        self.objects
            .get_mut(id.index())
            .ok_or_else(|| FolioError::scene(format!("unknown object id {}", id.0)))
    }

    /// Id of the object called `name`, if loaded.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    /// Like [`Scene::find`] but an error when absent.
    pub fn require(&self, name: &str) -> FolioResult<ObjectId> {
        self.find(name)
            .ok_or_else(|| FolioError::scene(format!("object '{name}' is not loaded")))
    }

    /// Add a subtree root to the pickable set. Registering twice is a no-op.
    pub fn register_interactive(&mut self, id: ObjectId) -> FolioResult<()> {
        self.get(id)?;
        if !self.interactive.contains(&id) {
            self.interactive.push(id);
        }
        Ok(())
    }

    /// Registered pickable roots in registration order.
    pub fn interactive(&self) -> &[ObjectId] {
        &self.interactive
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: ObjectId) -> FolioResult<Vec<ObjectId>> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let obj = self.get(next)?;
            out.push(next);
            stack.extend(obj.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Local-to-world matrix composed along the parent chain.
    pub fn world_affine(&self, id: ObjectId) -> FolioResult<DAffine3> {
        let mut obj = self.get(id)?;
        let mut m = obj.transform.to_affine();
        while let Some(parent) = obj.parent {
            obj = self.get(parent)?;
            m = obj.transform.to_affine() * m;
        }
        Ok(m)
    }

    /// Whether `id` and all of its ancestors are visible.
    pub fn is_shown(&self, id: ObjectId) -> FolioResult<bool> {
        let mut cursor = Some(id);
        while let Some(next) = cursor {
            let obj = self.get(next)?;
            if !obj.visible {
                return Ok(false);
            }
            cursor = obj.parent;
        }
        Ok(true)
    }

    /// World-space origin of `id`.
    pub fn world_position(&self, id: ObjectId) -> FolioResult<DVec3> {
        Ok(self.world_affine(id)?.transform_point3(DVec3::ZERO))
    }

    /// World-space centre of the collider of `id` (its origin when it has none).
    pub fn world_center(&self, id: ObjectId) -> FolioResult<DVec3> {
        let local = self.get(id)?.collider.map_or(DVec3::ZERO, |c| c.center);
        Ok(self.world_affine(id)?.transform_point3(local))
    }

    /// Replace the material colour of `id`.
    pub fn set_color(&mut self, id: ObjectId, color: Rgb) -> FolioResult<()> {
        self.get_mut(id)?.material = Some(Material { color });
        Ok(())
    }

    /// Current colour of `id`, if it is a mesh.
    pub fn color(&self, id: ObjectId) -> FolioResult<Option<Rgb>> {
        Ok(self.get(id)?.material.map(|m| m.color))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
