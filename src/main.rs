use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use universe::{AppState, config, error, server, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[clap(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();

    let mut config = config::Config::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if config.spotify_credentials().is_err() {
        warning!("Spotify client credentials are not configured; /callback will fail");
    }
    if config.lastfm_api_key.is_none() {
        warning!("LAST_FM_API_KEY is not set; scrobble counts will be 0");
    }

    if let Err(e) = server::start_api_server(AppState::shared(config)).await {
        error!("Server failed. Err: {}", e);
    }
}
