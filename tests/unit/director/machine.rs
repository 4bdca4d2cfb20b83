use super::*;
use crate::assets::load::AssetKey;
use crate::foundation::core::ObjectId;
use crate::scene::layout::StageLayout;

fn full_scene() -> (Scene, StageLayout) {
    let layout = StageLayout::default();
    let mut scene = Scene::new();
    for key in AssetKey::manifest() {
        layout.spawn(key, &mut scene).unwrap();
    }
    (scene, layout)
}

fn click(name: &str) -> Vec<Hit> {
    vec![Hit {
        object: ObjectId(0),
        name: name.to_owned(),
        distance: 1.0,
    }]
}

fn finish_intro(director: &mut Director, scene: &Scene, layout: &StageLayout) {
    director
        .begin_intro(scene, &layout.text_names())
        .unwrap()
        .unwrap();
    director.complete(Act::IntroText);
    director.complete(Act::IntroAvatar);
}

#[test]
fn intro_starts_once() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    let chains = director
        .begin_intro(&scene, &layout.text_names())
        .unwrap()
        .unwrap();
    assert_eq!(chains.len(), 3);
    assert_eq!(director.phase(), Phase::IntroRevealing);
    assert!(
        director
            .begin_intro(&scene, &layout.text_names())
            .unwrap()
            .is_none()
    );
}

#[test]
fn intro_done_needs_both_chains() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    director
        .begin_intro(&scene, &layout.text_names())
        .unwrap();
    director.complete(Act::IntroAvatar);
    assert_eq!(director.phase(), Phase::IntroRevealing);
    director.complete(Act::IntroText);
    assert_eq!(director.phase(), Phase::IntroDone);
}

#[test]
fn skills_click_before_intro_done_is_ignored() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    let texts = layout.text_names();
    assert!(
        director
            .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );
    director.begin_intro(&scene, &texts).unwrap();
    assert!(
        director
            .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );
    assert_eq!(director.phase(), Phase::IntroRevealing);
    assert!(!director.flags().walking_animation_started());
}

#[test]
fn skills_click_sets_busy_synchronously() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    finish_intro(&mut director, &scene, &layout);
    let texts = layout.text_names();

    let chain = director
        .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
        .unwrap();
    assert!(chain.is_some());
    assert_eq!(director.phase(), Phase::SkillsWalk);
    assert!(director.flags().walking_animation_started());

    assert!(
        director
            .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );
}

#[test]
fn acts_complete_in_order_and_flags_stay_set() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    finish_intro(&mut director, &scene, &layout);
    let texts = layout.text_names();

    // Credits are not reachable before the skills act.
    assert!(
        director
            .on_click(&click(CREDITS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );

    director
        .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
        .unwrap();
    director.complete(Act::Skills);
    assert_eq!(director.phase(), Phase::SkillsRevealed);
    assert!(director.flags().first_screen_completed());
    assert!(!director.flags().walking_animation_started());

    assert!(
        director
            .on_click(&click(SKILLS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );

    let credits = director
        .on_click(&click(CREDITS_BUTTON_BODY), &scene, &texts)
        .unwrap();
    assert!(credits.is_some());
    assert_eq!(director.phase(), Phase::CreditsWalk);
    director.flags_mut().mark_credits_shown();
    director.complete(Act::Credits);
    assert_eq!(director.phase(), Phase::CreditsRevealed);
    assert!(director.flags().first_screen_completed());
    assert!(director.flags().second_screen_completed());

    assert!(
        director
            .on_click(&click(CREDITS_BUTTON_BODY), &scene, &texts)
            .unwrap()
            .is_none()
    );
}

#[test]
fn clicks_on_other_objects_do_nothing() {
    let (scene, layout) = full_scene();
    let mut director = Director::new();
    finish_intro(&mut director, &scene, &layout);
    assert!(
        director
            .on_click(&click("html5"), &scene, &layout.text_names())
            .unwrap()
            .is_none()
    );
    assert!(director.on_click(&[], &scene, &layout.text_names()).unwrap().is_none());
    assert_eq!(director.phase(), Phase::IntroDone);
}
