use once_cell::sync::Lazy;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Initializes a compact subscriber once per test binary. Set `TEST_LOG` to see output.
pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info";
    let subscriber_name = "test";
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// Bunyan-formatted JSON subscriber. `RUST_LOG` directives take precedence over
/// `default_directives`.
pub fn get_subscriber<S, W>(name: S, default_directives: &str, sink: W) -> impl Subscriber + Sync + Send
where
    S: Into<String>,
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Registers the subscriber as the global default. Only the first registration takes effect;
/// later ones are reported and ignored.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global tracing subscriber already set: {err}");
    }
}
