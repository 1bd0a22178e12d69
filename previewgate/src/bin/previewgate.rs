use clap::Parser;

use previewgate::args::Args;
use previewgate::config::Config;
use previewgate::error::BootResult;
use previewgate::logging::{self, LogFormat};
use previewgate::srv::new_server;

const VERSION: &str = env!("CARGO_PKG_VERSION");

async fn start(args: Args) -> BootResult<()> {
    let mut config = Config::load(&args.config)?;
    args.merge_into_config(&mut config);
    config.validate()?;

    let format: LogFormat = config.log.format.parse().unwrap_or_default();
    let _guard = logging::init(&config.log.level, format, config.log.path.as_deref());

    tracing::info!(version = VERSION, "starting previewgate");

    let (server, bind_addr) = new_server(config)?;
    tracing::info!(%bind_addr, "previewgate is listening");
    server.await
}

#[actix_web::main]
async fn main() {
    if let Err(err) = start(Args::parse()).await {
        eprintln!("previewgate: {err}");
        std::process::exit(1);
    }
}
