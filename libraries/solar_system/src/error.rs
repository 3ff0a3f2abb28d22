use crate::graph::NodeId;
use std::ops;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    #[error("Animation period must be strictly positive and finite, got {0}")]
    InvalidPeriod(f64),
    #[error("Failed to parse period string: {:?}", &.0[.1.clone()])]
    MalformedString(String, ops::Range<usize>),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Radius must be strictly positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("Ring inner radius {inner} must be smaller than its outer radius {outer}")]
    InvertedRing { inner: f32, outer: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Cannot attach {child:?} under {parent:?}: it would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Invalid animation: {0}")]
    Animation(#[from] AnimationError),
    #[error("Invalid shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("Invalid hierarchy: {0}")]
    Graph(#[from] GraphError),
}
