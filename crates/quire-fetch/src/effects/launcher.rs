use std::io;
use std::process::{Command, Stdio};

/// Hands a URL to the user's browser.
///
/// Mirror candidates are delivered this way instead of proxying their bytes
/// through the client; cross-origin mirrors may not honor the auth headers a
/// streamed fetch would need.
pub trait Launcher: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", url]);
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };

        cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
        Ok(())
    }
}
