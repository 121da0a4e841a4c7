use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use beatline::actions::{Action, ActionChain, Disposition};
use beatline::settings::{CliOptions, Settings};
use beatline::{Event, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use prometheus::{Registry, TextEncoder};

static METRICS_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::new_custom(Some("beatline".to_string()), None).expect("failed to create prometheus registry")
});

fn main() -> Result<()> {
    // stdout carries the processed events
    let subscriber = beatline::logging::get_subscriber("beatline", "info", std::io::stderr);
    beatline::logging::init_subscriber(subscriber);

    let main_span = tracing::trace_span!("main");
    let _main_span_guard = main_span.enter();

    let options = CliOptions::parse();
    let settings = Settings::load(&options)?;
    beatline::metrics::register_metrics(&METRICS_REGISTRY)?;

    for module in settings.modules.iter() {
        tracing::info!(module=%module.module(), metricsets=?module.metricsets(), "module configured.");
    }

    let chain = ActionChain::from_settings(&settings.actions)?;

    let input: Box<dyn BufRead> = match options.input.as_ref() {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open event input: {}", path.display()))?;
            Box::new(BufReader::new(file))
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let summary = process_events(&chain, input, &mut output)?;
    tracing::info!(?summary, "finished processing events.");

    let metrics = TextEncoder::new().encode_to_string(&METRICS_REGISTRY.gather())?;
    tracing::debug!(%metrics, "final metrics");
    Ok(())
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Summary {
    read: usize,
    emitted: usize,
    dropped: usize,
    failed: usize,
    malformed: usize,
}

/// Runs each JSON-lines event through the chain and writes kept events. Events that are
/// malformed or fail an action are logged and skipped.
#[tracing::instrument(level = "debug", skip(chain, input, output))]
fn process_events(chain: &ActionChain, input: impl BufRead, output: &mut impl Write) -> Result<Summary> {
    let mut summary = Summary::default();

    for (line_nr, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.read += 1;

        let mut event = match Event::from_json(&line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error=%err, line=line_nr + 1, "skipping malformed event");
                summary.malformed += 1;
                continue;
            },
        };

        match chain.run(&mut event) {
            Ok(Disposition::Keep) => {
                writeln!(output, "{}", event.to_json()?)?;
                summary.emitted += 1;
            },
            Ok(Disposition::Drop) => summary.dropped += 1,
            Err(err) => {
                tracing::warn!(error=%err, line=line_nr + 1, "skipping event after action failure");
                summary.failed += 1;
            },
        }
    }

    output.flush()?;
    Ok(summary)
}
