use std::sync::Arc;

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::store::{RonFileStore, StoreHandle};

pub struct SunbirdEditorPlugin;

impl Plugin for SunbirdEditorPlugin {
    fn build(&self, app: &mut App) {
        // tests insert their own store before the plugin; the binary gets
        // the RON file store rooted at ./content
        if !app.world().contains_resource::<StoreHandle>() {
            app.insert_resource(StoreHandle(Arc::new(RonFileStore::new(
                crate::io::content_dir(),
            ))));
        }

        app.init_resource::<ButtonInput<KeyCode>>().add_plugins((
            crate::io::plugin,
            crate::state::plugin,
            crate::form::plugin,
            crate::preview::plugin,
            crate::binding::plugin,
            crate::notify::plugin,
            crate::project::plugin,
            crate::upload::plugin,
        ));
    }
}
