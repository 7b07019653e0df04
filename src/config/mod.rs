/// Main configuration module.
///
/// Re-exports submodules for game, scheduler, and server configuration.
pub mod game;
pub mod scheduler;
pub mod server;
