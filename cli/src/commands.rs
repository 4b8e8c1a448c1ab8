pub mod discover;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use lanprobe_common::config::{
    Config, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT, DEFAULT_RESOLVE_TIMEOUT, ScanConfig,
};
use lanprobe_common::network::target::Target;

#[derive(Parser)]
#[command(name = "lanprobe")]
#[command(about = "Finds live hosts on a local network.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip reverse name lookups; hosts are named device-1, device-2, ...
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Less output (-q drops decorations, -qq prints bare addresses)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not listen for 'q' to stop early
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover live hosts in a subnet
    #[command(alias = "d")]
    Discover(DiscoverArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// Subnet prefix (192.168.1), CIDR (192.168.1.0/24), range (192.168.1.10-50) or address
    #[arg(default_value = "192.168.1")]
    pub target: Target,

    /// TCP port used as the liveness signal
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Connect timeout per address, in milliseconds
    #[arg(long = "timeout", value_name = "MS", default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Reverse lookup timeout per live host, in milliseconds
    #[arg(long = "resolve-timeout", value_name = "MS", default_value_t = DEFAULT_RESOLVE_TIMEOUT.as_millis() as u64)]
    pub resolve_timeout_ms: u64,

    /// Keep rescanning until stopped, reporting only newly seen hosts
    #[arg(short, long)]
    pub watch: bool,

    /// Pause between rounds in watch mode, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 2)]
    pub interval: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_dns: self.no_dns,
            quiet: self.quiet.min(2),
            disable_input: self.no_input,
        }
    }
}

impl DiscoverArgs {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::for_port(self.port)
            .with_connect_timeout(Duration::from_millis(self.timeout_ms))
            .with_resolve_timeout(Duration::from_millis(self.resolve_timeout_ms))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn discover_defaults() {
        let cli = parse(&["lanprobe", "discover"]);
        let Commands::Discover(args) = cli.command;

        assert_eq!(args.target, Target::default());
        assert_eq!(args.scan_config(), ScanConfig::default());
        assert!(!args.watch);
        assert_eq!(args.interval(), Duration::from_secs(2));
    }

    #[test]
    fn discover_flags() {
        let cli = parse(&[
            "lanprobe", "-qqq", "--no-dns", "d", "10.0.0.0/24", "-p", "443", "--timeout", "80", "--watch",
        ]);
        let cfg = cli.config();
        assert!(cfg.no_dns);
        assert_eq!(cfg.quiet, 2);

        let Commands::Discover(args) = cli.command;
        let scan = args.scan_config();
        assert_eq!(args.target.range().prefix(), "10.0.0");
        assert_eq!(scan.port, 443);
        assert_eq!(scan.service, "443/https");
        assert_eq!(scan.connect_timeout, Duration::from_millis(80));
        assert!(args.watch);
    }

    #[test]
    fn bad_target_is_rejected() {
        assert!(CommandLine::try_parse_from(["lanprobe", "discover", "10.0.0.0/8"]).is_err());
    }
}
