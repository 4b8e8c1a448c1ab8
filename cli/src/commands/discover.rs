use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use colored::*;
use lanprobe_common::config::Config;
use lanprobe_common::network::host::HostRecord;
use lanprobe_common::network::range::HostRange;
use lanprobe_common::{info, success, warn};
use lanprobe_core::scanner::{CancelToken, ScanController, ScanOutcome, ScanSummary};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::commands::DiscoverArgs;
use crate::mprint;
use crate::terminal::{colors, input::InputListener, print, progress::TerminalReporter};

const CANCEL_POLL: Duration = Duration::from_millis(100);

type Detail = (String, ColoredString);

pub async fn discover(args: DiscoverArgs, cfg: &Config) -> anyhow::Result<()> {
    let range: HostRange = args.target.range().clone();
    let controller = ScanController::from_config(args.scan_config(), !cfg.no_dns);
    let cancel = CancelToken::new();

    let ctrl_c: JoinHandle<()> = spawn_ctrl_c(cancel.clone());
    let input: Option<InputListener> = if cfg.disable_input {
        None
    } else {
        InputListener::start(cancel.clone())
    };

    if cfg.quiet == 0 {
        print::print_status(format!(
            "Target {} ({} addresses), TCP {}, {} ms budget",
            args.target,
            range.len(),
            controller.config().service,
            controller.config().connect_timeout.as_millis()
        ));
        if input.is_some() {
            print::print_status("Press 'q' to stop early");
        }
    }

    let reporter = TerminalReporter::new(cfg.quiet);
    let start_time: Instant = Instant::now();
    let mut round: usize = 0;

    loop {
        round += 1;
        reporter.begin_round(round, range.len());

        let summary: ScanSummary = controller
            .start(&range, &reporter, &cancel)
            .instrument(reporter.span().clone())
            .await?;

        if summary.reporter_failures > 0 {
            warn!("{} notifications could not be delivered", summary.reporter_failures);
        }

        if !args.watch || summary.outcome == ScanOutcome::Cancelled {
            break;
        }

        info!("Round {round} done, next in {}s", args.interval);
        if !pause(args.interval(), &cancel).await {
            break;
        }
    }

    drop(input);
    ctrl_c.abort();

    let mut hosts: Vec<HostRecord> = reporter.hosts();
    discovery_ends(&mut hosts, start_time.elapsed(), cancel.is_cancelled(), cfg);
    Ok(())
}

fn spawn_ctrl_c(cancel: CancelToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing the current address");
            cancel.cancel();
        }
    })
}

/// Sleeps for `interval` unless cancelled first. Returns false on cancellation.
async fn pause(interval: Duration, cancel: &CancelToken) -> bool {
    let deadline: Instant = Instant::now() + interval;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        tokio::time::sleep(remaining.min(CANCEL_POLL)).await;
    }
}

fn discovery_ends(hosts: &mut [HostRecord], total_time: Duration, stopped: bool, cfg: &Config) {
    if hosts.is_empty() {
        no_hosts_found(cfg);
        return;
    }

    hosts.sort_by_key(|host| host.address.to_ipv4().unwrap_or(Ipv4Addr::UNSPECIFIED));

    if cfg.quiet == 2 {
        for host in hosts.iter() {
            print::print(host.address.as_str());
        }
        return;
    }

    if cfg.quiet == 0 {
        mprint!();
        print::header("Network Discovery", cfg.quiet);
        print_hosts(hosts);
    }
    print_summary(hosts.len(), total_time, stopped, cfg);
}

fn no_hosts_found(cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }
    print::header("ZERO HOSTS DETECTED", cfg.quiet);
    print::no_results();
    print::end_of_program();
}

fn print_hosts(hosts: &[HostRecord]) {
    for (idx, host) in hosts.iter().enumerate() {
        print::tree_head(idx, &host.display_name);
        print::as_tree_one_level(host_details(host));
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn host_details(host: &HostRecord) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("IPv4".to_string(), host.address.as_str().color(colors::IPV4_ADDR)),
        ("Service".to_string(), host.service_info.as_str().color(colors::SERVICE)),
    ];
    if host.looks_like_raspberry_pi() {
        details.push(("Board".to_string(), "Raspberry Pi (by name)".color(colors::HIGHLIGHT)));
    }
    details
}

fn print_summary(hosts_len: usize, total_time: Duration, stopped: bool, cfg: &Config) {
    let verb: &str = if stopped { "Stopped" } else { "Complete" };
    let active_hosts: ColoredString = format!("{hosts_len} active hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Discovery {verb}: {active_hosts} identified in {total_time}")
            .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::end_of_program();
        }
        _ => success!("{}", output),
    }
}
