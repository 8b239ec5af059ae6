use sunbird::prelude::*;
use sunbird_editor::form::{
    DiscardChangesEvent, EditFieldEvent, FormField, MoveSectionEvent, ReportForm,
};
use sunbird_editor::state::DirtyState;

use super::helpers::*;

#[test]
fn load_populates_the_form_from_the_store() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let form = app.world().resource::<ReportForm>();
    assert_eq!(form.sections.len(), SectionId::ALL.len());

    let hero = form.section(SectionId::Hero).expect("hero section");
    assert_eq!(hero.title, "Hero heading");
    assert_eq!(hero.body, "Hero body text");
    assert_eq!(hero.background, SEED_BACKGROUND);
}

#[test]
fn load_orders_sections_by_stored_position() {
    let store = seeded_store();

    // swap hero to the end of the page
    let mut hero = store.stored(SectionId::Hero).expect("seeded");
    hero.position = 10;
    store.seed(SectionId::Hero, hero);

    let mut app = create_editor_app(store);
    load_report(&mut app);

    let form = app.world().resource::<ReportForm>();
    assert_eq!(form.sections.last().map(|s| s.id), Some(SectionId::Hero));
}

#[test]
fn missing_sections_degrade_to_defaults() {
    let store = std::sync::Arc::new(sunbird_editor::store::MemoryStore::default());
    let mut content = SectionContent {
        title: "Only hero".to_string(),
        position: 0,
        ..Default::default()
    };
    content.sync_legacy_fields();
    store.seed(SectionId::Hero, content);

    let mut app = create_editor_app(store);
    load_report(&mut app);

    let form = app.world().resource::<ReportForm>();
    assert_eq!(form.sections.len(), SectionId::ALL.len());

    let stats = form.section(SectionId::Stats).expect("stats section");
    assert_eq!(stats.title, SectionId::Stats.title());
    assert_eq!(stats.background, GradientSpec::default().to_css());

    let notifications = app
        .world()
        .resource::<sunbird_editor::notify::Notifications>();
    assert!(
        notifications
            .iter()
            .any(|n| n.message.contains("starting from defaults"))
    );
}

#[test]
fn discard_restores_the_loaded_form_exactly() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let before = app.world().resource::<ReportForm>().clone();

    app.world_mut().trigger(EditFieldEvent {
        section: SectionId::Hero,
        field: FormField::Title,
        value: "Edited away".to_string(),
    });
    app.world_mut().trigger(MoveSectionEvent { from: 0, to: 3 });
    assert_ne!(*app.world().resource::<ReportForm>(), before);

    app.world_mut().trigger(DiscardChangesEvent);

    assert_eq!(*app.world().resource::<ReportForm>(), before);
    assert!(app.world().resource::<DirtyState>().is_clean());
}

#[test]
fn discard_from_a_clean_form_is_a_no_op() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let before = app.world().resource::<ReportForm>().clone();
    app.world_mut().trigger(DiscardChangesEvent);
    assert_eq!(*app.world().resource::<ReportForm>(), before);
}

#[test]
fn move_section_reorders_and_dirties() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    app.world_mut().trigger(MoveSectionEvent { from: 0, to: 2 });

    let form = app.world().resource::<ReportForm>();
    assert_eq!(form.sections[2].id, SectionId::Hero);
    assert!(app.world().resource::<DirtyState>().is_dirty());
}

#[test]
fn move_section_ignores_out_of_bounds_indices() {
    let mut app = create_editor_app(seeded_store());
    load_report(&mut app);

    let before = app.world().resource::<ReportForm>().clone();
    app.world_mut().trigger(MoveSectionEvent { from: 0, to: 99 });
    assert_eq!(*app.world().resource::<ReportForm>(), before);
    assert!(app.world().resource::<DirtyState>().is_clean());
}
