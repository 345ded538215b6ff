//! Knoll - a procedural hill scene with trees, a wandering creature and a
//! day/night sky

pub mod core;
pub mod math;
pub mod terrain;
pub mod generation;
pub mod entity;
pub mod atmosphere;
pub mod scene;
