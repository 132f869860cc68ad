//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use pulse_core::Store;
use pulse_server::ServerConfig;

/// Load the server configuration and apply command-line overrides
pub fn resolve_config(config_path: Option<&Path>, demo: bool) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(config_path)?;
    if demo {
        config.demo_mode = true;
    }
    Ok(config)
}

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    demo: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config_path, demo)?;

    println!("🚀 Starting Pulse web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if config.demo_mode {
        println!();
        println!("   ⚠️  Demo mode - mutating endpoints accept requests without a session");
    } else {
        println!("   🔒 Mutating endpoints require a bearer session (POST /api/login)");
    }
    match config.session_policy.ttl {
        Some(ttl) => println!("   ⏱️  Sessions expire after {} hours", ttl.num_hours()),
        None => println!("   ⏱️  Sessions last until restart"),
    }
    if config.schedule.enabled {
        println!(
            "   📅 Alerts: weekly '{}', monthly '{}' (UTC)",
            config.schedule.weekly, config.schedule.monthly
        );
    }
    if !config.allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;

    let store = Store::with_parts(
        config.session_policy,
        Box::new(pulse_core::RngEntropy::from_entropy()),
    );
    pulse_server::serve_with_config(store, host, port, static_dir_str, config).await?;

    Ok(())
}
