use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use sunbird::prelude::*;

use crate::io::{EditorData, save_editor_data};
use crate::notify::NotifyEvent;

pub fn plugin(app: &mut App) {
    app.init_resource::<EditorState>()
        .init_resource::<DirtyState>()
        .add_observer(on_select_section)
        .add_systems(Startup, restore_active_section)
        .add_systems(PostStartup, update_window_title)
        .add_systems(Update, update_window_title);
}

#[derive(Resource)]
pub struct EditorState {
    pub active_section: SectionId,
    pub loaded: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            active_section: SectionId::Hero,
            loaded: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Clean,
    Dirty,
    Saving,
}

/// Phase machine over the whole multi-section form. Every transition goes
/// through these methods so the dirty rules live in one place instead of
/// being re-derived at each mutation site.
#[derive(Resource, Default)]
pub struct DirtyState {
    phase: FormPhase,
}

impl DirtyState {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_clean(&self) -> bool {
        self.phase == FormPhase::Clean
    }

    pub fn is_dirty(&self) -> bool {
        self.phase == FormPhase::Dirty
    }

    pub fn is_saving(&self) -> bool {
        self.phase == FormPhase::Saving
    }

    /// First field mutation flips Clean to Dirty. Edits arriving while a
    /// save is outstanding are rejected upstream, so Saving never
    /// transitions here.
    pub fn mark_dirty(&mut self) {
        if self.phase == FormPhase::Clean {
            self.phase = FormPhase::Dirty;
        }
    }

    /// Only a Dirty form has anything to save.
    pub fn begin_save(&mut self) -> bool {
        if self.phase == FormPhase::Dirty {
            self.phase = FormPhase::Saving;
            true
        } else {
            false
        }
    }

    pub fn finish_save(&mut self, success: bool) {
        if self.phase == FormPhase::Saving {
            self.phase = if success {
                FormPhase::Clean
            } else {
                FormPhase::Dirty
            };
        }
    }

    pub fn reset_clean(&mut self) {
        self.phase = FormPhase::Clean;
    }
}

#[derive(Event)]
pub struct SelectSectionEvent(pub SectionId);

/// Section tabs are not individually persisted, so switching away from
/// pending edits would lose them silently. The navigation is rejected with
/// a notice instead.
fn on_select_section(
    event: On<SelectSectionEvent>,
    mut editor_state: ResMut<EditorState>,
    dirty_state: Res<DirtyState>,
    mut editor_data: ResMut<EditorData>,
    mut commands: Commands,
) {
    if editor_state.active_section == event.0 {
        return;
    }

    match dirty_state.phase() {
        FormPhase::Dirty => {
            commands.trigger(NotifyEvent::warning(
                "Save or discard your changes before switching sections",
            ));
        }
        FormPhase::Saving => {
            commands.trigger(NotifyEvent::warning(
                "Wait for the save to finish before switching sections",
            ));
        }
        FormPhase::Clean => {
            editor_state.active_section = event.0;
            editor_data.cache.last_active_section = Some(event.0.slug().to_string());
            save_editor_data(&editor_data);
        }
    }
}

// pick up where the editor was last closed
fn restore_active_section(editor_data: Res<EditorData>, mut editor_state: ResMut<EditorState>) {
    let Some(slug) = &editor_data.cache.last_active_section else {
        return;
    };

    if let Some(id) = SectionId::ALL.iter().find(|id| id.slug() == slug.as_str()) {
        editor_state.active_section = *id;
    }
}

fn update_window_title(
    editor_state: Res<EditorState>,
    dirty_state: Res<DirtyState>,
    mut window: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !editor_state.is_changed() && !dirty_state.is_changed() {
        return;
    }

    let Ok(mut window) = window.single_mut() else {
        return;
    };

    let prefix = if dirty_state.is_clean() { "" } else { "* " };

    window.title = format!(
        "{prefix}{} - Sunbird Editor",
        editor_state.active_section.title()
    );
}
