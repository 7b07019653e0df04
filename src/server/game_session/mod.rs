//! Game session layer: rooms, the scheduling actor, and the client connection.

pub mod room;
pub mod server;
pub mod countdown;
pub mod messages;
pub mod session;

pub use server::GameManager;
