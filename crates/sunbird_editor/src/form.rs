use bevy::prelude::*;
use sunbird::prelude::*;

use crate::io::ReloadEditorDataEvent;
use crate::notify::NotifyEvent;
use crate::preview::{PreviewSynchronizer, SectionPreview};
use crate::state::DirtyState;

pub fn plugin(app: &mut App) {
    app.init_resource::<ReportForm>()
        .init_resource::<FormSnapshot>()
        .add_observer(on_edit_field)
        .add_observer(on_move_section)
        .add_observer(on_discard_changes);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionForm {
    pub id: SectionId,
    pub title: String,
    pub body: String,
    /// Authoritative gradient string for the section background. Legacy
    /// fields are projected from it at save time, never stored here.
    pub background: String,
    pub image_url: Option<String>,
}

impl SectionForm {
    pub fn empty(id: SectionId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            body: String::new(),
            background: GradientSpec::default().to_css(),
            image_url: None,
        }
    }

    pub fn from_content(id: SectionId, content: &SectionContent) -> Self {
        let title = if content.title.is_empty() {
            id.title().to_string()
        } else {
            content.title.clone()
        };

        Self {
            id,
            title,
            body: content.body.clone(),
            background: content.background_css(),
            image_url: content.image_url.clone(),
        }
    }

    pub fn to_content(&self, position: u32) -> SectionContent {
        let mut content = SectionContent {
            title: self.title.clone(),
            body: self.body.clone(),
            background: Some(self.background.clone()),
            image_url: self.image_url.clone(),
            position,
            ..Default::default()
        };
        content.sync_legacy_fields();
        content
    }
}

/// The single authoritative in-memory copy of the whole form. Vec order is
/// page order.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ReportForm {
    pub sections: Vec<SectionForm>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            sections: SectionId::ALL.iter().map(|id| SectionForm::empty(*id)).collect(),
        }
    }
}

impl ReportForm {
    pub fn section(&self, id: SectionId) -> Option<&SectionForm> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut SectionForm> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}

/// Deep copy of the form, captured exactly once per successful load and
/// once per successful save.
#[derive(Resource, Default)]
pub struct FormSnapshot(Option<ReportForm>);

impl FormSnapshot {
    pub fn capture(&mut self, form: &ReportForm) {
        self.0 = Some(form.clone());
    }

    pub fn restore(&self) -> Option<ReportForm> {
        self.0.clone()
    }

    pub fn get(&self) -> Option<&ReportForm> {
        self.0.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    Background,
    ImageUrl,
}

#[derive(Event)]
pub struct EditFieldEvent {
    pub section: SectionId,
    pub field: FormField,
    pub value: String,
}

#[derive(Event)]
pub struct MoveSectionEvent {
    pub from: usize,
    pub to: usize,
}

#[derive(Event)]
pub struct DiscardChangesEvent;

fn on_edit_field(
    event: On<EditFieldEvent>,
    mut form: ResMut<ReportForm>,
    mut dirty_state: ResMut<DirtyState>,
    mut preview: ResMut<PreviewSynchronizer>,
    mut commands: Commands,
) {
    if dirty_state.is_saving() {
        commands.trigger(NotifyEvent::warning(
            "The report is saving; edits are disabled until it finishes",
        ));
        return;
    }

    let Some(section) = form.section_mut(event.section) else {
        return;
    };

    match event.field {
        FormField::Title => section.title = event.value.clone(),
        FormField::Body => section.body = event.value.clone(),
        FormField::Background => section.background = event.value.clone(),
        FormField::ImageUrl => {
            section.image_url = if event.value.is_empty() {
                None
            } else {
                Some(event.value.clone())
            };
        }
    }

    let preview_value = SectionPreview::of(section);
    dirty_state.mark_dirty();
    preview.push(preview_value);
}

fn on_move_section(
    event: On<MoveSectionEvent>,
    mut form: ResMut<ReportForm>,
    mut dirty_state: ResMut<DirtyState>,
    mut commands: Commands,
) {
    if dirty_state.is_saving() {
        commands.trigger(NotifyEvent::warning(
            "The report is saving; edits are disabled until it finishes",
        ));
        return;
    }

    let len = form.sections.len();
    if event.from >= len || event.to >= len || event.from == event.to {
        return;
    }

    let section = form.sections.remove(event.from);
    form.sections.insert(event.to, section);
    dirty_state.mark_dirty();
}

/// Only valid from Dirty: deep-copies the last snapshot back into the live
/// form. The shared swatch palette is re-read from disk rather than
/// restored, since it is not part of the per-form snapshot.
fn on_discard_changes(
    _event: On<DiscardChangesEvent>,
    mut form: ResMut<ReportForm>,
    mut dirty_state: ResMut<DirtyState>,
    snapshot: Res<FormSnapshot>,
    mut preview: ResMut<PreviewSynchronizer>,
    mut commands: Commands,
) {
    if !dirty_state.is_dirty() {
        return;
    }

    let Some(restored) = snapshot.restore() else {
        return;
    };

    *form = restored;
    dirty_state.reset_clean();
    preview.cancel_all();
    commands.trigger(ReloadEditorDataEvent);
    commands.trigger(NotifyEvent::success("Changes discarded"));
}
