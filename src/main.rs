use avian3d::prelude::*;
use bevy::prelude::*;

use stride::abilities::AbilitiesPlugin;
use stride::content::ContentPlugin;
use stride::core::CorePlugin;
use stride::movement::MovementPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Stride".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        CorePlugin,
        ContentPlugin,
        AbilitiesPlugin,
        MovementPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(stride::debug::DebugPlugin);

    app.run();
}
