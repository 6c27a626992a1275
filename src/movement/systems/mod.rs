//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::sample_ground;
pub(crate) use input::{begin_locomotion_frame, dispatch_ability_input, read_move_input};
pub(crate) use movement::{
    apply_planar_drive, apply_turn_input, integrate_bodies, publish_readout,
};
