//! Perpetual rotation animations.
//!
//! Spin and orbit are the same animation: a full turn about the local Y axis
//! repeated over a period. They only differ by the node they are attached to,
//! which is tracked with [`AnimationSlot`].

use crate::error::AnimationError;
use bevy::prelude::*;
use serde::de::Error;
use serde::{Deserializer, Serializer};
use std::f64::consts::TAU;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Period>()
            .register_type::<AnimationSlot>()
            .register_type::<RotationAnimation>()
            .register_type::<PerpetualRotation>()
            .add_systems(Update, advance_rotations);
    }
}

/// Length of one full turn, in seconds of virtual time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Reflect)]
pub struct Period(f64);

impl Period {
    pub fn new(seconds: f64) -> Result<Self, AnimationError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(AnimationError::InvalidPeriod(seconds))
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

impl FromStr for Period {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut seconds = 0f64;
        for s in s.split_whitespace() {
            if let Some(pos_unit) = s.find(|c: char| !c.is_ascii_digit() && c != '.') {
                let unit = &s[pos_unit..];
                let value = s[..pos_unit]
                    .parse::<f64>()
                    .map_err(|_| AnimationError::MalformedString(s.to_string(), 0..pos_unit))?;
                seconds += value
                    * match unit {
                        "d" | "day" | "days" => 86400.0,
                        "h" | "hour" | "hours" => 3600.0,
                        "m" | "min" | "minute" | "minutes" => 60.0,
                        "s" | "sec" | "second" | "seconds" => 1.0,
                        _ => {
                            return Err(AnimationError::MalformedString(
                                s.to_string(),
                                pos_unit..s.len(),
                            ))
                        }
                    };
            } else {
                seconds += s
                    .parse::<f64>()
                    .map_err(|_| AnimationError::MalformedString(s.to_string(), 0..s.len()))?;
            }
        }
        Self::new(seconds)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PeriodVisitor;

        impl serde::de::Visitor<'_> for PeriodVisitor {
            type Value = Period;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                write!(formatter, "a positive number of seconds or a duration string")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                self.visit_f64(v as _)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                self.visit_f64(v as _)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Period::new(v).map_err(E::custom)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Period::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PeriodVisitor)
    }
}

impl serde::Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

/// Which motion an animation drives on its node. A node holds at most one
/// animation per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub enum AnimationSlot {
    Spin,
    Orbit,
}

impl fmt::Display for AnimationSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spin => write!(f, "spin"),
            Self::Orbit => write!(f, "orbit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RotationAnimation {
    pub axis: Vec3,
    pub period: Period,
}

impl RotationAnimation {
    /// A full turn about +Y every `period`, repeated forever.
    pub fn full_turn(period: Period) -> Self {
        Self {
            axis: Vec3::Y,
            period,
        }
    }

    /// Angle in radians, in `[0, TAU)`, reached after `elapsed` seconds.
    pub fn angle_at(&self, elapsed: f64) -> f32 {
        let turns = elapsed.max(0.0) / self.period.as_secs();
        (turns.fract() * TAU) as f32
    }

    pub fn rotation_at(&self, elapsed: f64) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle_at(elapsed))
    }
}

/// Drives the local rotation of an entity from its attached animations.
#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct PerpetualRotation {
    pub base: Quat,
    pub tracks: Vec<RotationAnimation>,
    /// Virtual time at which the animations started.
    pub epoch: f64,
}

impl PerpetualRotation {
    pub fn new(base: Quat, tracks: impl IntoIterator<Item = RotationAnimation>, epoch: f64) -> Self {
        Self {
            base,
            tracks: tracks.into_iter().collect(),
            epoch,
        }
    }

    pub fn rotation_at(&self, now: f64) -> Quat {
        let elapsed = now - self.epoch;
        self.tracks
            .iter()
            .fold(self.base, |rotation, track| rotation * track.rotation_at(elapsed))
    }
}

pub fn advance_rotations(
    time: Res<Time<Virtual>>,
    mut q: Query<(&mut Transform, &PerpetualRotation)>,
) {
    let now = time.elapsed_secs_f64();
    for (mut transform, rotation) in &mut q {
        transform.rotation = rotation.rotation_at(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::ecs::system::RunSystemOnce;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn period_rejects_non_positive_values() {
        assert_eq!(Period::new(0.0), Err(AnimationError::InvalidPeriod(0.0)));
        assert_eq!(Period::new(-3.0), Err(AnimationError::InvalidPeriod(-3.0)));
        assert!(Period::new(f64::NAN).is_err());
        assert!(Period::new(f64::INFINITY).is_err());
        assert_eq!(Period::new(8.8).unwrap().as_secs(), 8.8);
    }

    #[test]
    fn parse_period_from_str() {
        let period: Period = "1m 30s".parse().unwrap();
        assert_eq!(period.as_secs(), 90.0);
        let period: Period = "36.5".parse().unwrap();
        assert_eq!(period.as_secs(), 36.5);
        let period: Period = "1h".parse().unwrap();
        assert_eq!(period.as_secs(), 3600.0);
    }

    #[test]
    fn parse_period_with_invalid_unit() {
        let result: Result<Period, _> = "1x".parse();
        assert_eq!(
            result,
            Err(AnimationError::MalformedString("1x".to_string(), 1..2))
        );
    }

    #[test]
    fn parse_zero_period_is_rejected() {
        let result: Result<Period, _> = "0s".parse();
        assert_eq!(result, Err(AnimationError::InvalidPeriod(0.0)));
    }

    #[test]
    fn deserialize_period_from_yaml() {
        let period: Period = serde_yaml::from_str("27").unwrap();
        assert_eq!(period.as_secs(), 27.0);
        let period: Period = serde_yaml::from_str("2.8").unwrap();
        assert_eq!(period.as_secs(), 2.8);
        let period: Period = serde_yaml::from_str("\"1m\"").unwrap();
        assert_eq!(period.as_secs(), 60.0);
        assert!(serde_yaml::from_str::<Period>("-1").is_err());
    }

    #[test]
    fn full_turn_uses_given_period() {
        let period = Period::new(365.0).unwrap();
        let animation = RotationAnimation::full_turn(period);
        assert_eq!(animation.period, period);
        assert_eq!(animation.axis, Vec3::Y);
    }

    #[test]
    fn angle_wraps_every_period() {
        let animation = RotationAnimation::full_turn(Period::new(4.0).unwrap());
        assert_relative_eq!(animation.angle_at(0.0), 0.0);
        assert_relative_eq!(animation.angle_at(1.0), FRAC_PI_2);
        assert_relative_eq!(animation.angle_at(2.0), PI);
        assert_relative_eq!(animation.angle_at(6.0), PI, epsilon = 1e-5);
        assert_relative_eq!(animation.angle_at(4000.0 + 1.0), FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn angle_keeps_turning_past_many_periods() {
        let animation = RotationAnimation::full_turn(Period::new(2.0).unwrap());
        assert_relative_eq!(animation.angle_at(1.0), PI);
        assert_relative_eq!(animation.angle_at(2001.0), PI, epsilon = 1e-4);
        assert_relative_eq!(animation.angle_at(-5.0), 0.0);
    }

    #[test]
    fn perpetual_rotation_composes_tracks_on_base() {
        let base = Quat::from_rotation_x(0.3);
        let spin = RotationAnimation::full_turn(Period::new(4.0).unwrap());
        let rotation = PerpetualRotation::new(base, [spin], 10.0);
        let expected = base * Quat::from_rotation_y(FRAC_PI_2);
        assert!(rotation.rotation_at(11.0).abs_diff_eq(expected, 1e-5));
        assert!(rotation.rotation_at(10.0).abs_diff_eq(base, 1e-5));
    }

    #[test]
    fn advance_rotations_updates_transforms() {
        let mut world = World::new();
        let mut time = Time::<Virtual>::default();
        time.advance_by(std::time::Duration::from_secs(1));
        world.insert_resource(time);
        let spin = RotationAnimation::full_turn(Period::new(4.0).unwrap());
        let entity = world
            .spawn((
                Transform::default(),
                PerpetualRotation::new(Quat::IDENTITY, [spin], 0.0),
            ))
            .id();

        world.run_system_once(advance_rotations).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert!(transform
            .rotation
            .abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2), 1e-5));
    }
}
