/// HTTP server configuration constants.

/// Address the HTTP/WebSocket server binds to.
pub const BIND_HOST: &str = "127.0.0.1";

/// Port the HTTP/WebSocket server listens on.
pub const BIND_PORT: u16 = 8080;

/// Query parameter carrying the player identifier on the game WebSocket.
pub const PLAYER_QUERY_PARAM: &str = "player";
