/// URL for accessing the PostgreSQL database backing the document store
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see
/// [tracing_subscriber's filter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Port the HTTP server listens on (defaults to 8080 when unset)
pub const PORT: &str = "PORT";
