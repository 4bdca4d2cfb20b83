use super::*;

#[test]
fn desktop_reveal_only_animates() {
    let mut overlay = Overlay::default();
    overlay.reveal(Platform::Desktop);
    assert_eq!(overlay.classes().collect::<Vec<_>>(), vec!["animated"]);
    assert!(!overlay.is_visible());
    overlay.panel_opacity = 1.0;
    assert!(overlay.is_visible());
}

#[test]
fn mobile_reveal_tags_orientation() {
    let mut overlay = Overlay::default();
    overlay.reveal(Platform::Mobile {
        orientation: Orientation::Portrait,
    });
    assert!(overlay.has_class("mobile"));
    assert!(overlay.has_class("portrait"));
    assert!(!overlay.has_class("landscape"));
}

#[test]
fn portrait_hides_canvas_and_shows_prompt() {
    let mut overlay = Overlay::default();
    let mut surface = Surface {
        canvas_opacity: 1.0,
        prompt_opacity: 1.0,
        prompt_hidden: true,
    };
    overlay.add_class("landscape");
    apply_orientation(&mut overlay, &mut surface, Orientation::Portrait, false);
    assert!(overlay.has_class("portrait"));
    assert!(!overlay.has_class("landscape"));
    assert!(!surface.prompt_hidden);
    assert_eq!(surface.canvas_opacity, 0.0);
}

#[test]
fn landscape_swaps_classes_only_after_credits() {
    let mut overlay = Overlay::default();
    let mut surface = Surface::default();
    overlay.add_class("portrait");

    apply_orientation(&mut overlay, &mut surface, Orientation::Landscape, false);
    assert!(overlay.has_class("portrait"));
    assert!(surface.prompt_hidden);
    assert_eq!(surface.canvas_opacity, 1.0);

    apply_orientation(&mut overlay, &mut surface, Orientation::Landscape, true);
    assert!(overlay.has_class("landscape"));
    assert!(!overlay.has_class("portrait"));
}

#[test]
fn mobile_page_load_depends_on_orientation() {
    let mut surface = Surface::default();
    surface.page_loaded_mobile(Orientation::Portrait);
    assert_eq!(surface.prompt_opacity, 1.0);
    assert_eq!(surface.canvas_opacity, 0.0);
    assert!(!surface.prompt_hidden);

    let mut surface = Surface::default();
    surface.page_loaded_mobile(Orientation::Landscape);
    assert!(surface.prompt_hidden);
    assert_eq!(surface.canvas_opacity, 1.0);
}

#[test]
fn platform_serializes_with_kind_tag() {
    let json = serde_json::to_string(&Platform::Mobile {
        orientation: Orientation::Landscape,
    })
    .unwrap();
    assert_eq!(json, r#"{"kind":"mobile","orientation":"landscape"}"#);
    let back: Platform = serde_json::from_str(r#"{"kind":"desktop"}"#).unwrap();
    assert_eq!(back, Platform::Desktop);
}
