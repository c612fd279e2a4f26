//! Bevy host for the density cloud: orbit camera, a Gizmos-based point
//! draw, and the keyboard layout switcher. Everything here sits
//! outside the core — the core never depends on bevy.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use matrix_core::{Layout, SimConfig};
use matrix_render::contract;
use matrix_sim::MatrixCore;

#[derive(Resource)]
struct Core(MatrixCore);

#[derive(Component)]
struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self { yaw: 0.6, pitch: 0.4, radius: 4.0 }
    }
}

const LAYOUT_KEYS: [(KeyCode, Layout); 6] = [
    (KeyCode::Digit1, Layout::RandomCartesianNaive),
    (KeyCode::Digit2, Layout::RandomCartesianDiscard),
    (KeyCode::Digit3, Layout::RandomSphericalNaive),
    (KeyCode::Digit4, Layout::RandomSphericalLatitude),
    (KeyCode::Digit5, Layout::RandomCartesianCube),
    (KeyCode::Digit6, Layout::DemoDualColorSlice),
];

fn main() {
    let config = SimConfig { capacity: 20_000, ..SimConfig::default() };
    let core = MatrixCore::new(config).expect("capacity must be nonzero");

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Matrix — Density Cloud".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Core(core))
        .add_systems(Startup, spawn_camera)
        .add_systems(Update, (keyboard_system, orbit_camera_system, tick_system, draw_system))
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::default(),
    ));
}

/// 1-6 pick a layout, Space toggles pause, H resets the camera home.
fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut core: ResMut<Core>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    for (key, layout) in LAYOUT_KEYS {
        if keys.just_pressed(key) {
            core.0.set_layout(layout);
        }
    }
    if keys.just_pressed(KeyCode::Space) {
        core.0.toggle_paused();
    }
    if keys.just_pressed(KeyCode::KeyH) {
        for mut orbit in &mut cameras {
            *orbit = OrbitCamera::default();
        }
    }
}

fn orbit_camera_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut orbit, mut transform) in &mut cameras {
        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.yaw -= mouse_motion.delta.x * 0.005;
            orbit.pitch = (orbit.pitch - mouse_motion.delta.y * 0.005).clamp(-1.5, 1.5);
        }
        orbit.radius = (orbit.radius - mouse_scroll.delta.y * 0.2).clamp(0.5, 20.0);

        let rotation = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
        transform.translation = rotation * Vec3::new(0.0, 0.0, orbit.radius);
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}

fn tick_system(time: Res<Time>, mut core: ResMut<Core>) {
    let dt_ms = time.delta_secs() * 1000.0;
    if let Err(err) = core.0.tick(dt_ms) {
        error!("matrix core tick failed: {err}");
    }
}

fn draw_system(core: Res<Core>, mut gizmos: Gizmos) {
    let (records, max_density) = core.0.snapshot();
    let inv_max = contract::inv_max_density(max_density);
    let dual_color = core.0.layout().is_dual_color_demo();

    for record in records {
        if !record.is_alive() {
            continue;
        }
        let color = if dual_color {
            contract::shade_dual_color(record)
        } else {
            contract::shade_standard(record, inv_max)
        };
        let [x, y, z] = record.pos;
        gizmos.sphere(Vec3::new(x, y, z), 0.01, Color::srgba(color[0], color[1], color[2], color[3]));
    }
}
