/// Default bind address for the gateway listener.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default port for the gateway listener.
pub const DEFAULT_SERVER_PORT: u16 = 5001;

/// Default client disconnect timeout in seconds.
/// This is the time the server waits for cleanup after a client disconnects.
pub const DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Seconds the server waits for in-flight requests on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;
