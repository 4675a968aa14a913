//! Status lines on stderr, the terminal stand-in for toast notifications.

use console::style;

pub fn info(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("info").cyan().bold(), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("ok").green().bold(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("warn").yellow().bold(), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("error").red().bold(), msg.as_ref());
}
