use std::fmt;

use colored::*;
use lanprobe_common::log::{HOST_TARGET, SUCCESS_TARGET};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use super::print::{PRINT_TARGET, RAW_MSG_FIELD};

/// Installs the global subscriber: coloured one-line events written above the
/// progress bar. `RUST_LOG` overrides the default filter.
pub fn init_logging(quiet: u8) {
    let indicatif_layer = IndicatifLayer::new();

    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(quiet)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(LanprobeFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer)
        .init();
}

// Found hosts are already printed by the progress reporter.
fn default_directives(quiet: u8) -> String {
    match quiet {
        0 => format!("info,{HOST_TARGET}=warn"),
        _ => format!("warn,{PRINT_TARGET}=info,{SUCCESS_TARGET}=info"),
    }
}

pub struct LanprobeFormatter;

impl<S, N> FormatEvent<S, N> for LanprobeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match *meta.level() {
                Level::INFO if meta.target() == SUCCESS_TARGET => ("[✔]", |s| s.green().bold()),
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO => ("[+]", |s| s.green().bold()),
                Level::WARN => ("[*]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Pulls the verbatim text out of a print event.
#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == RAW_MSG_FIELD {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == RAW_MSG_FIELD && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_keeps_printed_output() {
        assert_eq!(default_directives(0), "info,lanprobe::host=warn");
        let quiet = default_directives(1);
        assert!(quiet.starts_with("warn,"));
        assert!(quiet.contains("lanprobe::print=info"));
        assert!(quiet.contains("lanprobe::success=info"));
    }

    #[test]
    fn default_filter_hides_engine_host_events() {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::layer::{Context, Layer};

        #[derive(Clone, Default)]
        struct Targets(Arc<Mutex<Vec<String>>>);

        impl<S: Subscriber> Layer<S> for Targets {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                self.0.lock().unwrap().push(event.metadata().target().to_string());
            }
        }

        for quiet in 0..=2 {
            let seen = Targets::default();
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new(default_directives(quiet)))
                .with(seen.clone());

            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(target: "lanprobe::host", address = "10.0.0.2", "live host");
                tracing::info!(target: "lanprobe::success", "done");
            });

            assert_eq!(*seen.0.lock().unwrap(), vec!["lanprobe::success".to_string()]);
        }
    }
}
