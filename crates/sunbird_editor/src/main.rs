use bevy::prelude::*;
use bevy::window::WindowResolution;

use sunbird_editor::project::LoadReportEvent;
use sunbird_editor::SunbirdEditorPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sunbird Editor".into(),
                resolution: WindowResolution::new(1366, 768),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SunbirdEditorPlugin)
        .add_systems(Startup, load_report)
        .run();
}

fn load_report(mut commands: Commands) {
    commands.trigger(LoadReportEvent);
}
