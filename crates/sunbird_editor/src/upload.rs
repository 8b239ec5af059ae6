use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use sunbird::prelude::*;

use crate::form::{EditFieldEvent, FormField};
use crate::notify::NotifyEvent;
use crate::store::{StoreHandle, UploadMetadata};

pub fn plugin(app: &mut App) {
    app.init_resource::<UploadState>()
        .add_observer(on_browse_image)
        .add_systems(Update, (poll_picked_image, poll_upload_result));
}

/// An outstanding upload independently blocks saving; the save path checks
/// this before queuing anything.
#[derive(Resource, Default)]
pub struct UploadState {
    pub in_progress: bool,
}

#[derive(Event)]
pub struct BrowseImageEvent {
    pub section: SectionId,
}

#[derive(Resource, Clone)]
struct PickResult(Arc<Mutex<Option<(SectionId, PathBuf)>>>);

#[derive(Resource)]
struct UploadResult {
    section: SectionId,
    slot: Arc<Mutex<Option<Option<String>>>>,
}

fn on_browse_image(event: On<BrowseImageEvent>, mut commands: Commands) {
    let section = event.section;

    let picked = Arc::new(Mutex::new(None));
    let picked_clone = picked.clone();

    IoTaskPool::get()
        .spawn(async move {
            let file = rfd::AsyncFileDialog::new()
                .set_title("Choose Image")
                .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                .pick_file()
                .await;

            if let Some(file) = file {
                let path = file.path().to_path_buf();
                if let Ok(mut guard) = picked_clone.lock() {
                    *guard = Some((section, path));
                }
            }
        })
        .detach();

    commands.insert_resource(PickResult(picked));
}

fn poll_picked_image(
    result: Option<Res<PickResult>>,
    store: Res<StoreHandle>,
    mut upload_state: ResMut<UploadState>,
    mut commands: Commands,
) {
    let Some(result) = result else {
        return;
    };

    let picked = {
        let Ok(mut guard) = result.0.lock() else {
            return;
        };
        guard.take()
    };

    let Some((section, path)) = picked else {
        return;
    };
    commands.remove_resource::<PickResult>();

    let meta = UploadMetadata {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string()),
        size_bytes: std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
    };

    let slot = Arc::new(Mutex::new(None));
    let slot_clone = slot.clone();
    let store = store.0.clone();

    IoTaskPool::get()
        .spawn(async move {
            // resolve a target, then move the bytes; either step failing
            // fails the whole upload
            let uploaded = store.request_upload_target(&meta).and_then(|target| {
                std::fs::copy(&path, &target.upload_path)
                    .ok()
                    .map(|_| target.public_url)
            });
            if let Ok(mut guard) = slot_clone.lock() {
                *guard = Some(uploaded);
            }
        })
        .detach();

    upload_state.in_progress = true;
    commands.insert_resource(UploadResult { section, slot });
}

fn poll_upload_result(
    result: Option<Res<UploadResult>>,
    mut upload_state: ResMut<UploadState>,
    mut commands: Commands,
) {
    let Some(result) = result else {
        return;
    };

    let uploaded = {
        let Ok(mut guard) = result.slot.lock() else {
            return;
        };
        guard.take()
    };

    let Some(uploaded) = uploaded else {
        return;
    };

    upload_state.in_progress = false;
    match uploaded {
        // the public URL lands in the form through the regular typed edit
        // path, which also marks the form dirty
        Some(public_url) => {
            commands.trigger(EditFieldEvent {
                section: result.section,
                field: FormField::ImageUrl,
                value: public_url,
            });
        }
        None => {
            commands.trigger(NotifyEvent::error("Image upload failed"));
        }
    }
    commands.remove_resource::<UploadResult>();
}
