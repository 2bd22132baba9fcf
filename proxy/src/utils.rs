pub const SYSTEM_PATH: &str = "/system/functions";
pub const METRICS_PATH: &str = "/function/system-metrics";
pub const FUNCTION_KEY: &str = "function";
pub const METRICS_WINDOW_KEY: &str = "metrics_window";
/// user the gateway's basic auth is configured for
pub const ADMIN_USER: &str = "admin";
