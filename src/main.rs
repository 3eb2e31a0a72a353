use anyhow::Context;
use rental_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load rental settings")?;
    rental_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "rental-app bootstrap starting"
    );

    rental_app::run(settings).await
}
