//! Stormsea library - ocean under a scattering sky, with rain and lightning

pub mod camera;
pub mod cli;
pub mod controls;
pub mod error;
pub mod frame;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod weather;
