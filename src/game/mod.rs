//! Snake simulation: board geometry, entities, and the per-player Game.
//!
//! Nothing in here knows about actors or the network; the server layer drives it.

pub mod types;
pub mod grid;
pub mod entities;
pub mod state;

pub use types::*;
pub use grid::Grid;
pub use state::Game;
