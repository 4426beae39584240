use crate::{InternalError, SalesapError};
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

pub struct Telemetry<T>
where
    T: SubscriberExt + Send + Sync + 'static,
{
    pub subscriber: T,
}

/// Bunyan-formatted JSON subscriber. `RUST_LOG` wins over `env_filter`
/// when it is set.
pub fn get_subscriber<Sink>(
    name: &str,
    env_filter: &str,
    sink: Sink,
) -> Telemetry<impl SubscriberExt + Send + Sync + 'static>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let formatting_layer: BunyanFormattingLayer<Sink> =
        BunyanFormattingLayer::new(name.to_owned(), sink);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    Telemetry {
        subscriber: Registry::default()
            .with(filter_layer)
            .with(JsonStorageLayer)
            .with(formatting_layer),
    }
}

pub fn init_subscriber(
    subscriber: Telemetry<impl SubscriberExt + Send + Sync + 'static>,
) -> Result<(), SalesapError> {
    LogTracer::init().map_err(|e| {
        InternalError::configuration_error(&format!("Failed to set logger: {e}"))
    })?;
    set_global_default(subscriber.subscriber).map_err(|e| {
        InternalError::configuration_error(&format!("Failed to set subscriber: {e}"))
    })
}
