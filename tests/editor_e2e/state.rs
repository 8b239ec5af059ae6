use sunbird::prelude::*;
use sunbird_editor::form::{EditFieldEvent, FormField};
use sunbird_editor::state::{DirtyState, EditorState, FormPhase, SelectSectionEvent};

use super::helpers::*;

#[test]
fn dirty_state_defaults_to_clean() {
    let state = DirtyState::default();
    assert_eq!(state.phase(), FormPhase::Clean);
    assert!(state.is_clean());
}

#[test]
fn first_edit_flips_clean_to_dirty() {
    let mut state = DirtyState::default();
    state.mark_dirty();
    assert_eq!(state.phase(), FormPhase::Dirty);

    // further edits are idempotent
    state.mark_dirty();
    assert_eq!(state.phase(), FormPhase::Dirty);
}

#[test]
fn begin_save_requires_a_dirty_form() {
    let mut state = DirtyState::default();
    assert!(!state.begin_save());
    assert_eq!(state.phase(), FormPhase::Clean);

    state.mark_dirty();
    assert!(state.begin_save());
    assert_eq!(state.phase(), FormPhase::Saving);

    // a save cannot start while one is outstanding
    assert!(!state.begin_save());
}

#[test]
fn finish_save_outcome_decides_next_phase() {
    let mut state = DirtyState::default();
    state.mark_dirty();
    assert!(state.begin_save());
    state.finish_save(true);
    assert_eq!(state.phase(), FormPhase::Clean);

    state.mark_dirty();
    assert!(state.begin_save());
    state.finish_save(false);
    assert_eq!(state.phase(), FormPhase::Dirty);
}

#[test]
fn finish_save_outside_saving_is_a_no_op() {
    let mut state = DirtyState::default();
    state.finish_save(true);
    assert_eq!(state.phase(), FormPhase::Clean);

    state.mark_dirty();
    state.finish_save(true);
    assert_eq!(state.phase(), FormPhase::Dirty);
}

#[test]
fn reset_clean_discards_any_phase() {
    let mut state = DirtyState::default();
    state.mark_dirty();
    state.reset_clean();
    assert!(state.is_clean());
}

#[test]
fn editor_state_defaults_to_hero() {
    let state = EditorState::default();
    assert_eq!(state.active_section, SectionId::Hero);
    assert!(!state.loaded);
}

// the active section can be restored from cached editor data at startup,
// so navigation tests pick a target relative to wherever the app landed
fn other_section(active: SectionId) -> SectionId {
    if active == SectionId::Stories {
        SectionId::Gallery
    } else {
        SectionId::Stories
    }
}

#[test]
fn switching_sections_works_while_clean() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let target = other_section(app.world().resource::<EditorState>().active_section);
    app.world_mut().trigger(SelectSectionEvent(target));

    let state = app.world().resource::<EditorState>();
    assert_eq!(state.active_section, target);
}

#[test]
fn dirty_form_blocks_section_navigation() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let before = app.world().resource::<EditorState>().active_section;

    app.world_mut().trigger(EditFieldEvent {
        section: SectionId::Hero,
        field: FormField::Title,
        value: "Edited".to_string(),
    });
    assert!(app.world().resource::<DirtyState>().is_dirty());

    app.world_mut().trigger(SelectSectionEvent(other_section(before)));
    let state = app.world().resource::<EditorState>();
    assert_eq!(state.active_section, before);

    let notifications = app
        .world()
        .resource::<sunbird_editor::notify::Notifications>();
    let latest = notifications.latest().expect("navigation should warn");
    assert!(latest.message.contains("Save or discard"));
}
