#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use sunbird::prelude::*;
use sunbird_editor::SunbirdEditorPlugin;
use sunbird_editor::project::LoadReportEvent;
use sunbird_editor::state::EditorState;
use sunbird_editor::store::{MemoryStore, StoreHandle};

pub const SEED_BACKGROUND: &str = "linear-gradient(180deg, #5038a0, #121242)";

pub fn create_editor_app(store: Arc<MemoryStore>) -> App {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(bevy::app::ScheduleRunnerPlugin::run_loop(
            Duration::from_millis(10),
        )),
    );

    // the store must be in place before the plugin, which otherwise falls
    // back to the on-disk RON store
    app.insert_resource(StoreHandle(store));
    app.add_plugins(SunbirdEditorPlugin);

    app
}

pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());

    for (index, id) in SectionId::ALL.iter().enumerate() {
        let mut content = SectionContent {
            title: format!("{} heading", id.title()),
            body: format!("{} body text", id.title()),
            background: Some(SEED_BACKGROUND.to_string()),
            position: index as u32,
            ..Default::default()
        };
        content.sync_legacy_fields();
        store.seed(*id, content);
    }

    store
}

pub fn load_report(app: &mut App) {
    app.world_mut().trigger(LoadReportEvent);
    assert!(
        run_until(
            app,
            |app| app.world().resource::<EditorState>().loaded,
            500
        ),
        "report should finish loading"
    );
}

/// Updates the app until the predicate holds, sleeping between frames so
/// background IO tasks get a chance to resolve.
pub fn run_until(app: &mut App, mut done: impl FnMut(&mut App) -> bool, max_updates: u32) -> bool {
    for _ in 0..max_updates {
        app.update();
        if done(app) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}

pub fn advance_frames(app: &mut App, n: u32) {
    for _ in 0..n {
        app.update();
    }
}

/// advances the app for approximately the given number of seconds of real
/// time. useful for tests that depend on a timer elapsing.
pub fn advance_time(app: &mut App, seconds: f32) {
    let frame_count = (seconds / 0.016).ceil() as u32 + 2;
    let sleep_per_frame = Duration::from_secs_f64(seconds as f64 / frame_count as f64);
    for _ in 0..frame_count {
        std::thread::sleep(sleep_per_frame);
        app.update();
    }
}
