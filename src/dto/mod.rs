//! Data exchanged with the outside world: player input and rendered scenes.

pub mod input;
pub mod scene;
