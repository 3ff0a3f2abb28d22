use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

// The internal state of the pan-orbit controller
#[derive(Debug, Clone, Copy, PartialEq, Component, Reflect)]
#[reflect(Component)]
pub struct PanOrbitState {
    pub center: Vec3,
    pub radius: f32,
    pub upside_down: bool,
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for PanOrbitState {
    fn default() -> Self {
        PanOrbitState {
            center: Vec3::ZERO,
            radius: 1.0,
            upside_down: false,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl PanOrbitState {
    /// Adds the motion to yaw and pitch, keeping both within ±π.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw = wrap_angle(self.yaw + delta.x);
        self.pitch = wrap_angle(self.pitch + delta.y);
    }

    /// Zooming is exponential so it feels the same at every distance.
    pub fn zoom(&mut self, amount: f32) {
        self.radius *= (-amount).exp();
    }

    /// Camera transform looking at `center` from `radius` away.
    pub fn transform(&self) -> Transform {
        // YXZ Euler Rotation performs yaw/pitch/roll.
        let mut transform =
            Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0));
        transform.translation = self.center + transform.back() * self.radius;
        transform
    }
}

fn wrap_angle(angle: f32) -> f32 {
    if angle > PI {
        angle - TAU
    } else if angle < -PI {
        angle + TAU
    } else {
        angle
    }
}

/// The configuration of the pan-orbit controller
#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
#[require(PanOrbitState)]
pub struct PanOrbitCamera {
    /// World units per pixel of mouse motion
    pub pan_sensitivity: f32,
    /// Radians per pixel of mouse motion
    pub orbit_sensitivity: f32,
    /// Exponent per pixel of mouse motion
    pub zoom_sensitivity: f32,
    /// For devices with a notched scroll wheel, like desktop mice
    pub scroll_line_sensitivity: f32,
    /// For devices with smooth scrolling, like touchpads
    pub scroll_pixel_sensitivity: f32,
}

impl Default for PanOrbitCamera {
    fn default() -> Self {
        PanOrbitCamera {
            pan_sensitivity: 0.001,                 // 1000 pixels per world unit
            orbit_sensitivity: 0.1f32.to_radians(), // 0.1 degree per pixel
            zoom_sensitivity: 0.01,
            scroll_line_sensitivity: 16.0, // 1 "line" == 16 "pixels of motion"
            scroll_pixel_sensitivity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_sits_radius_away_from_center() {
        let state = PanOrbitState {
            center: Vec3::new(1.0, 0.0, 0.0),
            radius: 10.0,
            pitch: -0.4,
            yaw: 1.2,
            ..default()
        };
        let transform = state.transform();
        assert_relative_eq!(transform.translation.distance(state.center), 10.0, epsilon = 1e-4);
        let looking = transform.forward().dot((state.center - transform.translation).normalize());
        assert_relative_eq!(looking, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn level_camera_looks_down_negative_z() {
        let state = PanOrbitState {
            radius: 5.0,
            ..default()
        };
        let transform = state.transform();
        assert_relative_eq!(transform.translation.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(transform.translation.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_wraps_around() {
        let mut state = PanOrbitState {
            yaw: 3.0,
            ..default()
        };
        state.orbit(Vec2::new(0.5, -3.5));
        assert_relative_eq!(state.yaw, 3.5 - TAU, epsilon = 1e-5);
        assert_relative_eq!(state.pitch, TAU - 3.5, epsilon = 1e-5);
    }

    #[test]
    fn zoom_is_exponential() {
        let mut state = PanOrbitState {
            radius: 8.0,
            ..default()
        };
        state.zoom(2f32.ln());
        assert_relative_eq!(state.radius, 4.0, epsilon = 1e-5);
        state.zoom(-2f32.ln());
        assert_relative_eq!(state.radius, 8.0, epsilon = 1e-5);
    }
}
