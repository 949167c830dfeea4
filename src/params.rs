use std::path::PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flyq-endpoint", about = "Resolve a FlyQ endpoint address and print its effective configuration")]
pub struct Params {
    /// Endpoint address, e.g. `flyq:orders?brokers=localhost:9092`
    pub uri: String,

    /// Component settings file (TOML)
    #[arg(long, env = "FLYQ_ENDPOINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Let the endpoint fall back to the global TLS context
    #[arg(long, env = "FLYQ_USE_GLOBAL_SSL")]
    pub use_global_ssl: bool,

    #[arg(short, long)]
    pub verbose: bool,
}
