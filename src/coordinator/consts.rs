pub const DEFAULT_SERVER_ADDRESS: &str = "localhost";
pub const DEFAULT_SERVER_PORT: u16 = 9090;
pub const WEBSOCKET_PATH: &str = "/websocket";

pub const DEFAULT_CALLBACK_DEADLINE_MS: u64 = 2000;
pub const DEFAULT_CAPACITY: usize = 64;
