mod commands;
mod terminal;

use std::future::Future;
use std::time::Duration;

use commands::{CommandLine, Commands, discover};
use lanprobe_common::config::Config;
use terminal::{logging, print};
use tokio::runtime::{Builder, Runtime};

/// Timed-out reverse lookups keep a blocking thread inside the system
/// resolver; exit does not wait for them longer than this.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    logging::init_logging(cfg.quiet);

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    run_to_exit(runtime, async move {
        match commands.command {
            Commands::Discover(args) => {
                print::header("getting ready for discovery", cfg.quiet);
                discover::discover(args, &cfg).await
            }
        }
    })
}

fn run_to_exit<F: Future>(runtime: Runtime, fut: F) -> F::Output {
    let output = runtime.block_on(fut);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn exit_does_not_wait_for_stuck_blocking_work() {
        let runtime = Builder::new_multi_thread().enable_all().build().unwrap();

        let started = Instant::now();
        let answer = run_to_exit(runtime, async {
            tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(5)));
            42
        });

        assert_eq!(answer, 42);
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
