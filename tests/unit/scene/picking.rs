use super::*;
use crate::foundation::core::{DVec3, Transform3D};
use crate::foundation::math::Aabb;
use crate::scene::model::SceneObject;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0).unwrap()
}

fn boxed(name: &str, at: DVec3) -> SceneObject {
    SceneObject::new(name)
        .with_transform(Transform3D::at(at))
        .with_collider(Aabb::centered(DVec3::splat(0.2)))
}

fn aim(scene: &Scene, world: DVec3) -> Point {
    viewport().from_ndc(scene.camera.project(world).unwrap())
}

#[test]
fn hits_are_sorted_nearest_first() {
    let mut scene = Scene::new();
    let far = scene.spawn(boxed("far", DVec3::new(1.3, 1.0, -3.0)), None).unwrap();
    let near = scene.spawn(boxed("near", DVec3::new(1.3, 1.0, 0.0)), None).unwrap();
    scene.register_interactive(far).unwrap();
    scene.register_interactive(near).unwrap();

    let hits = Picker::pick(&scene, viewport(), Point::new(640.0, 360.0)).unwrap();
    let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["near", "far"]);
    assert!((hits[0].distance - 3.8).abs() < 1e-9);
}

#[test]
fn objects_outside_interactive_set_are_ignored() {
    let mut scene = Scene::new();
    scene.spawn(boxed("scenery", DVec3::new(1.3, 1.0, 0.0)), None).unwrap();
    let hits = Picker::pick(&scene, viewport(), Point::new(640.0, 360.0)).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn descendants_of_interactive_roots_are_pickable() {
    let mut scene = Scene::new();
    let root = scene
        .spawn(
            SceneObject::new("CreditsButton")
                .with_transform(Transform3D::at(DVec3::new(2.0, 0.5, 0.0)).with_uniform_scale(40.0)),
            None,
        )
        .unwrap();
    scene
        .spawn(
            SceneObject::new("CreditsButtonBody")
                .with_collider(Aabb::centered(DVec3::new(0.012, 0.004, 0.002))),
            Some(root),
        )
        .unwrap();
    scene.register_interactive(root).unwrap();

    let pointer = aim(&scene, DVec3::new(2.0, 0.5, 0.0));
    let hits = Picker::pick(&scene, viewport(), pointer).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "CreditsButtonBody");

    let miss = aim(&scene, DVec3::new(2.0, 1.5, 0.0));
    assert!(Picker::pick(&scene, viewport(), miss).unwrap().is_empty());
}

#[test]
fn nested_interactive_roots_report_each_hit_once() {
    let mut scene = Scene::new();
    let root = scene
        .spawn(SceneObject::new("group").with_transform(Transform3D::at(DVec3::new(1.3, 1.0, 0.0))), None)
        .unwrap();
    let child = scene
        .spawn(
            SceneObject::new("badge").with_collider(Aabb::centered(DVec3::splat(0.2))),
            Some(root),
        )
        .unwrap();
    scene.register_interactive(root).unwrap();
    scene.register_interactive(child).unwrap();

    let hits = Picker::pick(&scene, viewport(), Point::new(640.0, 360.0)).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].object, child);
}

#[test]
fn hidden_objects_are_skipped() {
    let mut scene = Scene::new();
    let id = scene.spawn(boxed("html5", DVec3::new(1.3, 1.0, 0.0)), None).unwrap();
    scene.register_interactive(id).unwrap();
    scene.get_mut(id).unwrap().visible = false;
    let hits = Picker::pick(&scene, viewport(), Point::new(640.0, 360.0)).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn rotated_collider_is_picked_in_its_own_frame() {
    let mut scene = Scene::new();
    let mut t = Transform3D::at(DVec3::new(1.3, 1.0, 0.0));
    t.rotation.y = std::f64::consts::FRAC_PI_2;
    let id = scene
        .spawn(
            SceneObject::new("react")
                .with_transform(t)
                .with_collider(Aabb::centered(DVec3::new(0.5, 0.1, 0.05))),
            None,
        )
        .unwrap();
    scene.register_interactive(id).unwrap();

    // After a quarter turn the long local X axis points along world Z, so a point half a unit
    // to the side no longer hits.
    let side = aim(&scene, DVec3::new(1.6, 1.0, 0.0));
    assert!(Picker::pick(&scene, viewport(), side).unwrap().is_empty());
    let centre = aim(&scene, DVec3::new(1.3, 1.0, 0.0));
    assert_eq!(Picker::pick(&scene, viewport(), centre).unwrap().len(), 1);
}
