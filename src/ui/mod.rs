use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContext, EguiPlugin};
use egui::{Align, Align2, Color32, FontId, Ui};
use solar_system::body::PlanetaryBody;
use solar_system::orbit::DrawOrbits;
use solar_system::scene::components::SceneCamera;

mod inspector;

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 1000.0;
const SPEED_STEP: f32 = 10.0;

const MARKER_RADIUS: f32 = 5.0;
const LABEL_OFFSET: f32 = MARKER_RADIUS + 3.0;

#[derive(Default)]
pub struct UiPlugin {
    pub with_inspector: bool,
}

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin);
        }

        // The top panel is laid out before the central one.
        app.init_resource::<ShowLabels>()
            .add_systems(Update, (top_bar, body_labels).chain());

        if self.with_inspector {
            app.add_plugins(inspector::Plugin);
        }
    }
}

#[derive(Resource, Deref, DerefMut)]
struct ShowLabels(bool);

impl Default for ShowLabels {
    fn default() -> Self {
        Self(true)
    }
}

fn top_bar(
    mut q_egui: Query<&mut EguiContext, With<PrimaryWindow>>,
    mut time: ResMut<Time<Virtual>>,
    mut draw_orbits: ResMut<DrawOrbits>,
    mut show_labels: ResMut<ShowLabels>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let Ok(mut egui) = q_egui.get_single_mut() else {
        return;
    };
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .filter(|fps| fps.is_enabled)
        .and_then(|fps| fps.average());

    egui::TopBottomPanel::top("toolbar")
        .frame(default_frame())
        .show(egui.get_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("T+{:.0}s", time.elapsed_secs_f64()));
                ui.with_layout(egui::Layout::right_to_left(Align::Max), |ui| {
                    ui.label(fps_text(fps));
                    ui.separator();
                    let mut draw = **draw_orbits;
                    if ui.checkbox(&mut draw, "Draw orbits").changed() {
                        **draw_orbits = draw;
                    }
                    ui.checkbox(&mut show_labels.0, "Show labels");
                    speed_controls(ui, &mut time);
                    let label = if time.is_paused() { "Resume" } else { "Pause" };
                    if ui.button(label).clicked() {
                        toggle_pause(&mut time);
                    }
                });
            });
        });
}

fn toggle_pause(time: &mut Time<Virtual>) {
    if time.is_paused() {
        time.unpause();
    } else {
        time.pause();
    }
}

fn speed_controls(ui: &mut Ui, time: &mut Time<Virtual>) {
    let mut speed = time.relative_speed();
    ui.with_layout(egui::Layout::left_to_right(Align::Max), |ui| {
        if ui.button("-").clicked() {
            time.set_relative_speed(step_speed(speed, SPEED_STEP.recip()));
        }
        let drag = egui::DragValue::new(&mut speed)
            .suffix("x")
            .range(MIN_SPEED..=MAX_SPEED);
        if ui.add(drag).changed() {
            time.set_relative_speed(speed);
        }
        if ui.button("+").clicked() {
            time.set_relative_speed(step_speed(speed, SPEED_STEP));
        }
    });
}

fn step_speed(speed: f32, factor: f32) -> f32 {
    (speed * factor).clamp(MIN_SPEED, MAX_SPEED)
}

fn fps_text(fps: Option<f64>) -> String {
    fps.map(|fps| format!("FPS: {fps:2.1} Hz"))
        .unwrap_or_else(|| "FPS: N/A".to_string())
}

fn label_text(name: Option<&Name>, distance: f32) -> String {
    let name = name.map_or("Unknown Body", Name::as_str);
    format!("{name}\n{distance:.1} u")
}

/// Marks every body on screen and recenters the camera on a double click
/// anywhere outside the panels.
fn body_labels(
    mut q_egui: Query<&mut EguiContext, With<PrimaryWindow>>,
    q_camera: Query<(&GlobalTransform, &Camera), With<SceneCamera>>,
    q_bodies: Query<(&GlobalTransform, Option<&Name>), With<PlanetaryBody>>,
    show_labels: Res<ShowLabels>,
    mut commands: Commands,
) {
    let Ok(mut egui) = q_egui.get_single_mut() else {
        return;
    };
    let Ok((cam_transform, camera)) = q_camera.get_single() else {
        return;
    };

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(egui.get_mut(), |ui| {
            if ui
                .allocate_rect(ui.clip_rect(), egui::Sense::click())
                .double_clicked()
            {
                commands.trigger(pan_orbit::events::RecenterCamera);
            }
            if !**show_labels {
                return;
            }

            let painter = ui.painter();
            for (transform, name) in &q_bodies {
                let position = transform.translation();
                let Ok(viewport) = camera.world_to_viewport(cam_transform, position) else {
                    continue;
                };
                let center = egui::pos2(viewport.x, viewport.y);
                let distance = position.distance(cam_transform.translation());
                painter.circle_filled(center, MARKER_RADIUS, Color32::WHITE);
                painter.text(
                    center + egui::vec2(LABEL_OFFSET, LABEL_OFFSET),
                    Align2::LEFT_CENTER,
                    label_text(name, distance),
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }
        });
}

fn default_frame() -> egui::Frame {
    let frame = egui::Frame::default();
    let [r, g, b, _] = frame.fill.to_array();
    frame
        .fill(Color32::from_rgba_unmultiplied(r, g, b, 128))
        .inner_margin(egui::vec2(8.0, 6.0))
}
