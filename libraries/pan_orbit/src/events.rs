use bevy::prelude::*;

/// Moves the orbit center of every pan-orbit camera back to the origin.
#[derive(Debug, Copy, Clone, Default, Event)]
pub struct RecenterCamera;
