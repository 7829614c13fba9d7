mod clock;
mod config;
mod dns;
mod http;

use clap::Parser;
use clock::SystemClock;
use config::Config;
use dns::handlers::build_chain;
use dns::log_viewer::LogViewer;
use dns::server::DnsService;
use std::path::PathBuf;
use std::sync::Arc;
use synthdns_server::UdpServer;

/// An authoritative DNS server whose answers are derived from the query
/// name itself.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more YAML configuration files. Later files override earlier
    /// ones, merged recursively.
    #[arg(required = true, env = "SYNTHDNS_CONFIG")]
    config_paths: Vec<PathBuf>,
}

fn init_logs() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, registry, EnvFilter};

    let _ = registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=debug", env!("CARGO_PKG_NAME")).into()
        }))
        .with(fmt::layer().with_ansi(cfg!(debug_assertions)))
        .try_init();
}

#[tokio::main]
async fn main() {
    init_logs();

    let args = Args::parse();

    let config = match Config::load(&args.config_paths) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("couldn't load configuration: {error}");
            std::process::exit(1);
        }
    };

    let predefined = match config.predefined_table() {
        Ok(table) => table,
        Err(error) => {
            tracing::error!("invalid predefined records: {error}");
            std::process::exit(1);
        }
    };

    let log_viewer = Arc::new(LogViewer::new());
    let chain = build_chain(Arc::new(SystemClock), predefined);
    let service = DnsService::new(chain, log_viewer.clone(), &config.domain);

    let dns_address = config.dns.address();
    let http_router = http::router(log_viewer);

    let mut tasks = Vec::new();

    tasks.push(tokio::spawn(async move {
        tracing::info!("starting dns server on {dns_address:?}");
        let server = UdpServer::new(dns_address, service);
        if let Err(error) = server.run().await {
            tracing::error!("dns server stopped: {error:?}");
            std::process::exit(1);
        }
    }));

    for address in config.http.listen_on.clone() {
        let router = http_router.clone();
        tasks.push(tokio::spawn(async move {
            let socket_address: std::net::SocketAddr = match address.parse() {
                Ok(address) => address,
                Err(error) => {
                    tracing::error!("invalid http listen address {address:?}: {error}");
                    std::process::exit(1);
                }
            };
            tracing::info!("starting http server on {socket_address:?}");
            if let Err(error) = axum::Server::bind(&socket_address)
                .serve(router.into_make_service())
                .await
            {
                tracing::error!("http server on {socket_address:?} stopped: {error}");
            }
        }));
    }

    for task in tasks {
        let _ = task.await;
    }
}
