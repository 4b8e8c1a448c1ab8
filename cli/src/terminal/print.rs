use std::fmt::Display;

use colored::*;
use lanprobe_common::network::host::HostRecord;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "lanprobe::print";
pub const RAW_MSG_FIELD: &str = "raw_msg";

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Writes `msg` verbatim through the logging pipeline so it never tears the progress bar.
pub fn print(msg: &str) {
    info!(target: "lanprobe::print", raw_msg = msg);
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

/// One line per host, printed the moment it is found.
pub fn found_host(host: &HostRecord) {
    let address: ColoredString = format!("{:<15}", host.address.as_str()).color(colors::IPV4_ADDR);
    let name: ColoredString = host.display_name.as_str().color(colors::PRIMARY);
    let service: ColoredString = host.service_info.as_str().color(colors::SERVICE);
    let mut line: String = format!("{} {}  {}  {}", "+".color(colors::HIGHLIGHT), address, name, service);
    if host.looks_like_raspberry_pi() {
        line.push_str(&format!("  {}", "[pi]".color(colors::HIGHLIGHT).bold()));
    }
    print(&line);
}

pub fn tree_head<V: Display>(idx: usize, name: V) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.to_string().color(colors::PRIMARY)
    );
    print(&output);
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: String = ".".repeat(7usize.saturating_sub(key.len()));
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = "no host answered on the probed port";

pub fn no_results() {
    centerln(&no_results_line().to_string());
}

fn no_results_line() -> ColoredString {
    format!("✗ {NO_RESULTS}").red().bold()
}

pub fn end_of_program() {
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
}
