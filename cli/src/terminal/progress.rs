use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use indicatif::ProgressStyle;
use lanprobe_common::network::{address::Address, host::HostRecord};
use lanprobe_core::scanner::ScanReporter;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::print;

const TEMPLATE: &str = "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len}";
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Reports scan events on the terminal.
///
/// Progress moves the bar attached to `span`. A host is printed the first time
/// its address is seen; later rounds (watch mode) stay silent about it.
pub struct TerminalReporter {
    span: Span,
    quiet: u8,
    known: Mutex<HashSet<Address>>,
    hosts: Mutex<Vec<HostRecord>>,
}

impl TerminalReporter {
    pub fn new(quiet: u8) -> Self {
        let span: Span = info_span!("discovery", indicatif.pb_show = true);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            span.pb_set_style(&style.tick_strings(TICKS).progress_chars("━╸ "));
        }

        Self {
            span,
            quiet,
            known: Mutex::new(HashSet::new()),
            hosts: Mutex::new(Vec::new()),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Resets the bar for a new pass over `len` addresses.
    pub fn begin_round(&self, round: usize, len: usize) {
        self.span.pb_set_length(len as u64);
        self.span.pb_set_position(0);
        let msg: String = if round > 1 {
            format!("Round {round}, probing")
        } else {
            "Probing".to_string()
        };
        self.span.pb_set_message(&msg);
    }

    /// Hosts reported so far, one per address, in discovery order.
    pub fn hosts(&self) -> Vec<HostRecord> {
        self.hosts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScanReporter for TerminalReporter {
    fn on_progress(&self, index: usize) -> anyhow::Result<()> {
        self.span.pb_set_position(index as u64);
        Ok(())
    }

    fn on_host_found(&self, host: HostRecord) -> anyhow::Result<()> {
        let is_new: bool = self
            .known
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(host.address.clone());
        if !is_new {
            return Ok(());
        }

        if self.quiet < 2 {
            print::found_host(&host);
        }
        self.hosts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(host);
        Ok(())
    }
}
