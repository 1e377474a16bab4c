//! Output sinks for the finished status line.

use tokio::process::Command;

use crate::config::Sink;
use crate::error::{Error, Result};

/// Push one line to the configured sink. The root-window sink pads the
/// line with spaces the way the classic dwm setup expects.
pub async fn push(sink: Sink, line: &str) -> Result<()> {
    match sink {
        Sink::Stdout => {
            println!("{line}");
            Ok(())
        }
        Sink::RootWindow => {
            let status = Command::new("xsetroot")
                .arg("-name")
                .arg(format!(" {line} "))
                .status()
                .await
                .map_err(|e| Error::ExternalTool(format!("xsetroot: {e}")))?;
            if status.success() {
                Ok(())
            } else {
                Err(Error::ExternalTool(format!(
                    "xsetroot exited with {status}"
                )))
            }
        }
    }
}
