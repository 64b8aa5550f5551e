/// Default bind address for the REST listener
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port for the REST listener
pub const DEFAULT_PORT: u16 = 3001;
/// Default directory for the JSON collections
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default access-token lifetime shorthand
pub const DEFAULT_ACCESS_TTL: &str = "15m";
/// Default refresh-token lifetime shorthand
pub const DEFAULT_REFRESH_TTL: &str = "7d";
/// Minimum accepted length for JWT signing secrets
pub const MIN_SECRET_LEN: usize = 16;
/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Maximum page size for list endpoints - request cap
pub const MAX_PAGE_SIZE: usize = 100;
