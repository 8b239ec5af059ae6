use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use sunbird::prelude::*;

use crate::form::{FormSnapshot, ReportForm, SectionForm};
use crate::notify::NotifyEvent;
use crate::preview::PreviewSynchronizer;
use crate::state::{DirtyState, EditorState};
use crate::store::StoreHandle;
use crate::upload::UploadState;

pub fn plugin(app: &mut App) {
    app.add_observer(on_load_report)
        .add_observer(on_save_report)
        .add_systems(
            Update,
            (
                handle_save_keyboard_shortcut,
                poll_fetch_results,
                pump_save_queue,
            ),
        );
}

#[derive(Event)]
pub struct LoadReportEvent;

#[derive(Event)]
pub struct SaveReportEvent;

type FetchSlot = Arc<Mutex<Option<Option<SectionContent>>>>;
type SaveSlot = Arc<Mutex<Option<bool>>>;

#[derive(Resource)]
struct LoadInFlight {
    slots: Vec<(SectionId, FetchSlot)>,
}

/// Kicks off one fetch per section. The fetches are independent and
/// unordered; a failed fetch only degrades its own section to defaults.
fn on_load_report(_event: On<LoadReportEvent>, store: Res<StoreHandle>, mut commands: Commands) {
    let mut slots = Vec::new();

    for id in SectionId::ALL {
        let slot: FetchSlot = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();
        let store = store.0.clone();

        IoTaskPool::get()
            .spawn(async move {
                let fetched = store.fetch_section(id);
                if let Ok(mut guard) = slot_clone.lock() {
                    *guard = Some(fetched);
                }
            })
            .detach();

        slots.push((id, slot));
    }

    commands.insert_resource(LoadInFlight { slots });
}

fn poll_fetch_results(
    in_flight: Option<Res<LoadInFlight>>,
    mut form: ResMut<ReportForm>,
    mut snapshot: ResMut<FormSnapshot>,
    mut dirty_state: ResMut<DirtyState>,
    mut editor_state: ResMut<EditorState>,
    mut preview: ResMut<PreviewSynchronizer>,
    mut commands: Commands,
) {
    let Some(in_flight) = in_flight else {
        return;
    };

    // apply nothing until every fetch resolved; they land in any order
    let mut results = Vec::new();
    for (id, slot) in &in_flight.slots {
        let Ok(guard) = slot.lock() else {
            return;
        };
        let Some(result) = guard.clone() else {
            return;
        };
        results.push((*id, result));
    }

    let mut ordered: Vec<(u32, SectionForm)> = Vec::new();
    for (index, (id, fetched)) in results.into_iter().enumerate() {
        match fetched {
            Some(content) => {
                ordered.push((content.position, SectionForm::from_content(id, &content)));
            }
            None => {
                ordered.push((index as u32, SectionForm::empty(id)));
                commands.trigger(NotifyEvent::warning(format!(
                    "Could not load the {} section; starting from defaults",
                    id.title()
                )));
            }
        }
    }

    // stored position decides page order
    ordered.sort_by_key(|(position, _)| *position);
    form.sections = ordered.into_iter().map(|(_, section)| section).collect();

    snapshot.capture(&form);
    dirty_state.reset_clean();
    preview.cancel_all();
    editor_state.loaded = true;
    commands.remove_resource::<LoadInFlight>();
}

#[derive(Resource)]
struct SaveInFlight {
    queue: VecDeque<(SectionId, SectionContent)>,
    current: Option<(SectionId, SaveSlot)>,
    saved: Vec<SectionId>,
}

fn on_save_report(
    _event: On<SaveReportEvent>,
    form: Res<ReportForm>,
    mut dirty_state: ResMut<DirtyState>,
    upload_state: Res<UploadState>,
    in_flight: Option<Res<SaveInFlight>>,
    mut commands: Commands,
) {
    if in_flight.is_some() {
        return;
    }

    if upload_state.in_progress {
        commands.trigger(NotifyEvent::warning(
            "An image upload is still in progress; wait for it before saving",
        ));
        return;
    }

    // only a Dirty form has anything to save
    if !dirty_state.begin_save() {
        return;
    }

    let queue = form
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| (section.id, section.to_content(index as u32)))
        .collect();

    commands.insert_resource(SaveInFlight {
        queue,
        current: None,
        saved: Vec::new(),
    });
}

/// Strictly sequential: each section's save resolves before the next is
/// dispatched. On the first failure the remaining queue is abandoned and
/// already-saved sections stay saved; there is no rollback.
fn pump_save_queue(
    in_flight: Option<ResMut<SaveInFlight>>,
    store: Res<StoreHandle>,
    form: Res<ReportForm>,
    mut snapshot: ResMut<FormSnapshot>,
    mut dirty_state: ResMut<DirtyState>,
    mut commands: Commands,
) {
    let Some(mut in_flight) = in_flight else {
        return;
    };

    if let Some((id, slot)) = in_flight.current.clone() {
        let result = {
            let Ok(mut guard) = slot.lock() else {
                return;
            };
            guard.take()
        };

        match result {
            None => return,
            Some(true) => {
                in_flight.saved.push(id);
                in_flight.current = None;
            }
            Some(false) => {
                let report = if in_flight.saved.is_empty() {
                    format!("Could not save the {} section; nothing was saved", id.title())
                } else {
                    let saved: Vec<&str> =
                        in_flight.saved.iter().map(|saved| saved.title()).collect();
                    format!(
                        "Could not save the {} section; already saved: {}",
                        id.title(),
                        saved.join(", ")
                    )
                };

                dirty_state.finish_save(false);
                commands.trigger(NotifyEvent::error(report));
                commands.remove_resource::<SaveInFlight>();
                return;
            }
        }
    }

    match in_flight.queue.pop_front() {
        Some((id, content)) => {
            let slot: SaveSlot = Arc::new(Mutex::new(None));
            let slot_clone = slot.clone();
            let store = store.0.clone();

            IoTaskPool::get()
                .spawn(async move {
                    let saved = store.save_section(id, &content);
                    if let Ok(mut guard) = slot_clone.lock() {
                        *guard = Some(saved);
                    }
                })
                .detach();

            in_flight.current = Some((id, slot));
        }
        None => {
            snapshot.capture(&form);
            dirty_state.finish_save(true);
            commands.trigger(NotifyEvent::success("Report saved"));
            commands.remove_resource::<SaveInFlight>();
        }
    }
}

fn handle_save_keyboard_shortcut(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    let ctrl_or_cmd = keyboard.pressed(KeyCode::SuperLeft)
        || keyboard.pressed(KeyCode::SuperRight)
        || keyboard.pressed(KeyCode::ControlLeft)
        || keyboard.pressed(KeyCode::ControlRight);

    if ctrl_or_cmd && keyboard.just_pressed(KeyCode::KeyS) {
        commands.trigger(SaveReportEvent);
    }
}
