use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use serde::{Deserialize, Serialize};

pub fn plugin(app: &mut App) {
    let editor_data = load_editor_data();
    app.insert_resource(editor_data)
        .add_observer(on_add_swatch)
        .add_observer(on_reload_editor_data);
}

#[derive(Resource, Serialize, Deserialize, Default)]
pub struct EditorData {
    pub palette: SwatchPalette,
    pub cache: EditorCache,
}

#[derive(Serialize, Deserialize, Default)]
pub struct EditorCache {
    pub last_active_section: Option<String>,
}

/// Recently used hex colors, newest first.
#[derive(Serialize, Deserialize, Default)]
pub struct SwatchPalette {
    pub colors: Vec<String>,
}

impl SwatchPalette {
    const MAX_SWATCHES: usize = 24;

    pub fn add(&mut self, hex: String) {
        self.colors.retain(|c| c != &hex);
        self.colors.insert(0, hex);
        self.colors.truncate(Self::MAX_SWATCHES);
    }
}

/// Adds a color to the swatch palette and persists it.
#[derive(Event)]
pub struct AddSwatchEvent(pub String);

/// Re-reads editor data from disk, replacing any unsaved palette state.
#[derive(Event)]
pub struct ReloadEditorDataEvent;

fn on_add_swatch(event: On<AddSwatchEvent>, mut editor_data: ResMut<EditorData>) {
    editor_data.palette.add(event.0.clone());
    save_editor_data(&editor_data);
}

fn on_reload_editor_data(_: On<ReloadEditorDataEvent>, mut editor_data: ResMut<EditorData>) {
    *editor_data = load_editor_data();
}

pub fn working_dir() -> PathBuf {
    env::current_dir().unwrap_or_default()
}

pub fn content_dir() -> PathBuf {
    working_dir().join("content")
}

fn editor_data_path() -> PathBuf {
    working_dir().join("editor.ron")
}

pub fn load_editor_data() -> EditorData {
    let path = editor_data_path();
    if path.exists() {
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| ron::from_str(&contents).ok())
            .unwrap_or_default()
    } else {
        EditorData::default()
    }
}

pub fn save_editor_data(data: &EditorData) {
    let path = editor_data_path();
    let Ok(contents) = ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default()) else {
        return;
    };

    IoTaskPool::get()
        .spawn(async move {
            let Ok(mut file) = File::create(&path) else {
                warn!("failed to create editor data file");
                return;
            };
            if file.write_all(contents.as_bytes()).is_err() {
                warn!("failed to write editor data");
            }
        })
        .detach();
}
