//! Spatial storage: the terrain grid and its occupancy layer.

pub mod grid;
