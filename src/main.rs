//! waymark - location acquisition and map synchronization daemon
//!
//! Picks a location source from configuration (manager, fused, or
//! overlay), feeds its fixes through the event loop into the map, and
//! renders map commands to the log. Runs against the simulated fix
//! provider; real deployments plug platform providers into the same
//! seams.

use std::env;
use std::path::Path;
use std::sync::Arc;
use waymark::app::App;
use waymark::config::AppConfig;
use waymark::error::Result;
use waymark::map::ConsoleWidget;
use waymark::permission::StaticPermissionHost;
use waymark::providers::SimulatedProvider;
use waymark::ui::UiEvent;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `waymark <path>` (positional)
/// - `waymark --config <path>` (flag-based)
/// - `waymark -c <path>` (short flag)
///
/// Defaults to `waymark.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    // Default path
    "waymark.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let (config, config_loaded) = if Path::new(&config_path).exists() {
        (AppConfig::from_file(&config_path)?, true)
    } else {
        (AppConfig::demo_defaults(), false)
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!("waymark v0.1.0 starting...");
    if config_loaded {
        log::info!("Using config: {}", config_path);
    } else {
        log::info!("No config at {}, using demo defaults", config_path);
    }

    let host = Arc::new(StaticPermissionHost::granting_on_prompt());
    let provider = Box::new(SimulatedProvider::new(&config.simulation));
    let widget = Box::new(ConsoleWidget::new(config.map.min_zoom, config.map.max_zoom));

    let mut app = App::new(&config, host, provider, widget)?;

    // Set up shutdown signal handler
    let dispatcher = app.dispatcher();
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        dispatcher.post(UiEvent::Shutdown);
    })
    .map_err(|e| waymark::error::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    log::info!("waymark running. Press Ctrl-C to stop.");
    app.run()?;

    log::info!("waymark stopped");
    Ok(())
}
