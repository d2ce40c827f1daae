use ai_summarizer::config::ClientConfig;

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ClientConfig::load()?;
    tracing::info!(api_base = %config.api_base, "starting AI Summarizer client");

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(ai_summarizer::ui::App);
    Ok(())
}
