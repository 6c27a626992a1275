//! Stride: ability arbitration and locomotion integration for Bevy.
//!
//! `physics` and `abilities` hold the engine-independent core; the other
//! domains host it in a Bevy app with Avian physics.

pub mod abilities;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
pub mod physics;
