use super::*;

#[test]
fn walking_and_standing_are_exclusive() {
    let mut flags = CutsceneFlags::default();
    flags.mark_walking();
    assert!(flags.is_walking() && !flags.is_standing());
    flags.mark_standing();
    assert!(!flags.is_walking() && flags.is_standing());
}

#[test]
fn credits_reveal_completes_second_screen() {
    let mut flags = CutsceneFlags::default();
    flags.mark_credits_shown();
    assert!(flags.credits_visible());
    assert!(flags.second_screen_completed());
    assert!(!flags.first_screen_completed());
}

#[test]
fn busy_flag_toggles() {
    let mut flags = CutsceneFlags::default();
    flags.begin_walk();
    assert!(flags.walking_animation_started());
    flags.end_walk();
    assert!(!flags.walking_animation_started());
}
