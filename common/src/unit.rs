//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity update.
#[derive(Clone, Copy, Debug)]
pub struct Modification;

/// Marker type describing a termination of something running.
#[derive(Clone, Copy, Debug)]
pub struct Termination;
