use clap::Parser;
use std::net::SocketAddr;

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Telemetry ingestion API for pin-state readings")]
pub struct PinlogApiConfig {
    #[clap(
        short,
        long,
        env = "PINLOG_API_BIND_ADDR",
        default_value = "0.0.0.0:5000"
    )]
    pub bind_addr: SocketAddr,

    /// Print the OpenAPI document as JSON and exit.
    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    /// MongoDB connection string. The database named in the URI is used,
    /// falling back to `esp32DB` when the URI names none.
    #[clap(
        long,
        env = "PINLOG_API_MONGODB_URI",
        default_value = "mongodb://localhost:27017/esp32DB"
    )]
    pub mongodb_uri: String,
}
