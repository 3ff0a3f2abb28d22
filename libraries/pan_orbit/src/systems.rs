use bevy::prelude::*;

use crate::components::{PanOrbitCamera, PanOrbitState};
use crate::events::RecenterCamera;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use std::f32::consts::FRAC_PI_2;

#[derive(Default)]
pub(crate) struct BlockedInputs {
    pointer: bool,
    keyboard: bool,
}

pub(crate) fn get_blocked_inputs(
    mut egui: bevy_egui::EguiContexts,
    q_window_entities: Query<Entity, With<Window>>,
) -> BlockedInputs {
    let mut ret = BlockedInputs::default();
    for window_entity in &q_window_entities {
        if let Some(ctx) = egui.try_ctx_for_entity_mut(window_entity) {
            ret.pointer |= ctx.wants_pointer_input();
            ret.keyboard |= ctx.wants_keyboard_input();
        }
    }
    ret
}

pub(crate) fn pan_orbit_camera(
    In(blocked_inputs): In<BlockedInputs>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut evr_motion: EventReader<MouseMotion>,
    mut evr_scroll: EventReader<MouseWheel>,
    mut q_camera: Query<(&PanOrbitCamera, &mut PanOrbitState, &mut Transform)>,
) {
    if blocked_inputs.pointer {
        evr_motion.clear();
        evr_scroll.clear();
        return;
    }

    let mut total_motion: Vec2 = evr_motion.read().map(|ev| ev.delta).sum();

    // Window coordinates are Y-down
    total_motion.y = -total_motion.y;

    let mut total_scroll_lines = Vec2::ZERO;
    let mut total_scroll_pixels = Vec2::ZERO;
    for ev in evr_scroll.read() {
        match ev.unit {
            MouseScrollUnit::Line => {
                total_scroll_lines.x += ev.x;
                total_scroll_lines.y -= ev.y;
            }
            MouseScrollUnit::Pixel => {
                total_scroll_pixels.x += ev.x;
                total_scroll_pixels.y -= ev.y;
            }
        }
    }

    let shift = !blocked_inputs.keyboard
        && (keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight));

    for (settings, mut state, mut transform) in &mut q_camera {
        let mut total_pan = Vec2::ZERO;
        let mut total_orbit = Vec2::ZERO;
        if mouse_buttons.pressed(MouseButton::Left) && shift {
            total_pan -= total_motion * settings.pan_sensitivity;
        } else if mouse_buttons.pressed(MouseButton::Left) {
            total_orbit -= total_motion * settings.orbit_sensitivity;
        }

        let mut total_zoom = Vec2::ZERO;
        total_zoom -=
            total_scroll_lines * settings.scroll_line_sensitivity * settings.zoom_sensitivity;
        total_zoom -=
            total_scroll_pixels * settings.scroll_pixel_sensitivity * settings.zoom_sensitivity;

        // Decided once per drag
        if mouse_buttons.just_pressed(MouseButton::Left) {
            state.upside_down = state.pitch < -FRAC_PI_2 || state.pitch > FRAC_PI_2;
        }
        if state.upside_down {
            total_orbit.x = -total_orbit.x;
        }

        let mut any = false;
        if total_zoom != Vec2::ZERO {
            any = true;
            state.zoom(total_zoom.y);
        }
        if total_orbit != Vec2::ZERO {
            any = true;
            state.orbit(total_orbit);
        }
        // Pan scales with the radius so it adapts to the current zoom.
        if total_pan != Vec2::ZERO {
            any = true;
            let radius = state.radius;
            state.center += transform.right() * total_pan.x * radius;
            state.center += transform.up() * total_pan.y * radius;
        }

        if any || state.is_changed() {
            *transform = state.transform();
        }
    }
}

pub fn recenter_camera(_: Trigger<RecenterCamera>, mut q_state: Query<&mut PanOrbitState>) {
    for mut state in &mut q_state {
        debug!("Recentering camera");
        state.center = Vec3::ZERO;
    }
}
