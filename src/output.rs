//! Command stream destination

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// Where the finished command stream goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    #[default]
    Stdout,
    /// A file or device node such as `/dev/usb/lp0`
    Path(PathBuf),
}

impl OutputSink {
    /// `None` or `-` selects standard output
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => Self::Path(p),
            _ => Self::Stdout,
        }
    }

    /// Write the whole stream at once and flush it
    pub fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()?;
            }
            Self::Path(path) => {
                // Device nodes are written in place, regular files replaced.
                let mut file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(!is_device(path))
                    .open(path)?;
                file.write_all(bytes)?;
                file.flush()?;
            }
        }
        debug!("Wrote {} bytes to {}", bytes.len(), self);
        Ok(())
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_device(path: &std::path::Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.is_file() && !m.is_dir())
        .unwrap_or(false)
}
