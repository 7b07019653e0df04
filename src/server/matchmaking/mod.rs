/// Matchmaking module: game modes and room assignment.

pub mod matchmaker;
pub mod types;
