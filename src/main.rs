use clap::Parser;
use tokio::net::TcpListener;

use gesturehub::config::{Config, KeyInjection};
use gesturehub::emitter::spawn_emitters;
use gesturehub::state::AppState;

/// Debug WebSocket hub for gesture and driver-state events.
#[derive(Parser, Debug)]
#[command(name = "gesturehub", version, about)]
struct Cli {
    /// Host to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for auto-assign (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Key injection for relayed gestures: off, log or xdotool.
    #[arg(long, value_parser = parse_key_injection)]
    key_injection: Option<KeyInjection>,

    /// Do not relay client gestures to other clients.
    #[arg(long)]
    no_relay: bool,
}

fn parse_key_injection(value: &str) -> Result<KeyInjection, String> {
    KeyInjection::parse(value).ok_or_else(|| format!("unknown key injection mode '{value}'"))
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(mode) = self.key_injection {
            config.key_injection = mode;
        }
        if self.no_relay {
            config.relay_gestures = false;
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesturehub=debug,tower_http=debug".into()),
        )
        .init();

    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);
    print_banner(&config);

    let state = AppState::from_config(&config);
    let emitters = spawn_emitters(&state, &config.emitters);

    let app = gesturehub::routes::router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .expect("failed to bind");

    let local = listener.local_addr().expect("failed to get local address");
    eprintln!("  \x1b[32m→ listening on ws://{local}\x1b[0m");
    eprintln!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    for handle in emitters {
        handle.abort();
    }
    tracing::info!("server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    let on_off = |b: bool| if b { "on" } else { "off" };

    eprintln!();
    eprintln!("  \x1b[1;36mgesturehub\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mbind\x1b[0m         {}:{}", config.host, config.port);
    eprintln!("  \x1b[2mrelay\x1b[0m        {}", on_off(config.relay_gestures));
    eprintln!("  \x1b[2mkeys\x1b[0m         {}", config.key_injection.as_str());
    eprintln!(
        "  \x1b[2mgesture\x1b[0m      {} ({:?}..{:?})",
        on_off(config.gesture_debug),
        config.emitters.gesture_min_delay,
        config.emitters.gesture_max_delay
    );
    eprintln!(
        "  \x1b[2mdriver\x1b[0m       {} (cooldown {:?})",
        on_off(config.driver_debug),
        config.emitters.driver_cooldown
    );
    eprintln!();
}
