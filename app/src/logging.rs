use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize the tracing subscriber: env-filtered fmt output plus span
/// traces captured for color-eyre reports.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .with(env_filter)
        .try_init()?;

    Ok(())
}
