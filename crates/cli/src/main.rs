use anyhow::Context;
use clap::{Parser, Subcommand};
use rental_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "rental", about = "Car rental service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print every mounted route
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load rental settings")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            rental_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "rental serve");
            rental_app::run(settings).await
        }
        Command::Routes => {
            let registry = rental_app::build_registry(&settings)?;
            for line in route_lines(&rental_http::router::merged_openapi(&registry)) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn route_lines(spec: &serde_json::Value) -> Vec<String> {
    let Some(paths) = spec["paths"].as_object() else {
        return Vec::new();
    };

    paths
        .iter()
        .flat_map(|(path, item)| {
            item.as_object()
                .into_iter()
                .flat_map(|methods| methods.keys())
                .map(move |method| format!("{:<7} {}", method.to_uppercase(), path))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_lines_lists_each_method() {
        let spec = serde_json::json!({
            "paths": {
                "/api/cars": { "get": {}, "post": {} },
                "/healthz": { "get": {} }
            }
        });

        assert_eq!(
            route_lines(&spec),
            vec!["GET     /api/cars", "POST    /api/cars", "GET     /healthz"]
        );
    }
}
