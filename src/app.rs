use crate::ui;
use bevy::core_pipeline::bloom::Bloom;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_inspector_egui::DefaultInspectorConfigPlugin;
use pan_orbit::components::{PanOrbitCamera, PanOrbitState};
use pan_orbit::PanOrbitCameraPlugin;
use solar_system::scene::components::{SceneCamera, SolarSystemRoot};
use solar_system::scene::CameraConfig;
use solar_system::SolarSystemPlugin;

pub(crate) const ASSET_DIR: &str = "assets";
pub(crate) const DEFAULT_SCENE: &str = "scenes/solar.system.yaml";

pub(crate) struct AppSettings {
    pub(crate) resolution: WindowResolution,
    pub(crate) with_inspector: bool,
    pub(crate) scene: String,
    pub(crate) time_scale: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            resolution: WindowResolution::default(),
            with_inspector: false,
            scene: DEFAULT_SCENE.to_string(),
            time_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Resource)]
struct StartupScene {
    path: String,
    time_scale: f32,
}

pub fn get_app(settings: AppSettings) -> App {
    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Bevy Orrery".to_string(),
                    resolution: settings.resolution,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: ASSET_DIR.to_string(),
                ..default()
            }),
        DefaultInspectorConfigPlugin,
        PanOrbitCameraPlugin,
    ))
    .add_plugins((
        SolarSystemPlugin,
        ui::UiPlugin {
            with_inspector: settings.with_inspector,
        },
    ))
    .insert_resource(ClearColor(Color::BLACK))
    .insert_resource(StartupScene {
        path: settings.scene,
        time_scale: settings.time_scale,
    })
    .add_systems(Startup, setup)
    .add_observer(on_add_scene_camera)
    .add_observer(debug_show_named_entities);
    app
}

fn debug_show_named_entities(trigger: Trigger<OnAdd, Name>, q: Query<&Name>) {
    if let Ok(name) = q.get(trigger.entity()) {
        debug!("{entity}: {name}", entity = trigger.entity());
    }
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scene: Res<StartupScene>,
    mut time: ResMut<Time<Virtual>>,
) {
    info!("Loading {} at {}x speed", scene.path, scene.time_scale);
    time.set_relative_speed(scene.time_scale);
    commands.spawn((
        Name::new("Scene"),
        SolarSystemRoot(asset_server.load(scene.path.clone())),
    ));
}

fn on_add_scene_camera(
    trigger: Trigger<OnAdd, SceneCamera>,
    mut commands: Commands,
    q_config: Query<&CameraConfig>,
) {
    debug!("Add scene camera to {}", trigger.entity());
    let config = q_config.get(trigger.entity()).cloned().unwrap_or_default();
    let state = PanOrbitState {
        radius: config.radius,
        pitch: config.pitch,
        yaw: config.yaw,
        ..default()
    };
    commands.entity(trigger.entity()).insert((
        PanOrbitCamera::default(),
        state,
        state.transform(),
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Bloom {
            intensity: 0.05,
            ..default()
        },
    ));
}
