use bevy::prelude::*;

pub mod components;
pub mod events;
mod systems;

pub struct PanOrbitCameraPlugin;

impl Plugin for PanOrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::PanOrbitState>()
            .register_type::<components::PanOrbitCamera>()
            .add_systems(
                Update,
                systems::get_blocked_inputs
                    .pipe(systems::pan_orbit_camera)
                    .run_if(
                        any_with_component::<components::PanOrbitState>
                            .and(resource_exists::<bevy_egui::EguiUserTextures>),
                    ),
            )
            .add_observer(systems::recenter_camera);
    }
}
