use bevy::prelude::*;
use sunbird::gradient::ColorStop;
use sunbird::prelude::*;

use crate::form::ReportForm;
use crate::io::AddSwatchEvent;
use crate::notify::NotifyEvent;
use crate::preview::{PreviewSynchronizer, SectionPreview};
use crate::state::DirtyState;

pub fn plugin(app: &mut App) {
    app.add_observer(on_stop_color_commit);
}

/// A color picker commits against a `(section, stop_index)` pair, never a
/// raw color. `alpha: None` keeps the stop's current alpha.
#[derive(Event)]
pub struct StopColorCommitEvent {
    pub section: SectionId,
    pub stop_index: usize,
    pub rgb: [u8; 3],
    pub alpha: Option<f32>,
}

/// Re-parses the *current* value of the gradient field at commit time,
/// patches only the addressed stop, and writes the whole string back to
/// the single authoritative field. Working from a cached spec instead
/// would clobber concurrent edits to the other stops.
fn on_stop_color_commit(
    event: On<StopColorCommitEvent>,
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

    let mut spec = GradientSpec::parse(&section.background);
    let Some(stop) = spec.stops.get_mut(event.stop_index) else {
        return;
    };

    let alpha = event.alpha.unwrap_or(stop.alpha);
    *stop = ColorStop::with_alpha(event.rgb, alpha);
    section.background = spec.to_css();

    let preview_value = SectionPreview::of(section);
    dirty_state.mark_dirty();
    preview.push(preview_value);
    commands.trigger(AddSwatchEvent(ColorStop::opaque(event.rgb).hex()));
}
