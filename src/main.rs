use bevy::prelude::*;

use party_jump::PartyJumpPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Party Jump".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        PartyJumpPlugin,
        party_jump::ui::UiPlugin,
        party_jump::stage::StagePlugin,
    ))
    .add_systems(Startup, spawn_camera);

    #[cfg(feature = "dev-tools")]
    app.add_plugins(party_jump::debug::DebugPlugin);

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
