//! # Character Device Transport
//!
//! Writes print jobs to a kernel printer node. On Linux the `usblp` driver
//! exposes USB receipt printers as `/dev/usb/lpN`; serial and parallel
//! printers show up as `/dev/ttyUSBN` or `/dev/lpN`.
//!
//! ## Permissions
//!
//! ```bash
//! # The node is usually owned by the lp group
//! $ ls -l /dev/usb/lp0
//! crw-rw---- 1 root lp 180, 0 ... /dev/usb/lp0
//! $ sudo usermod -aG lp $USER
//! ```
//!
//! ## Chunked Writes
//!
//! Large jobs (raster images) are written in chunks with a short pause
//! between them so the printer's input buffer does not overflow.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::Transport;
use crate::error::{ImpresoraError, Result};

/// Default USB printer node
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Printer Transport
///
/// ## Example
///
/// ```no_run
/// use impresora::encoder::CommandEncoder;
/// use impresora::transport::DeviceTransport;
///
/// # async fn run() -> impresora::Result<()> {
/// let mut device = DeviceTransport::open("/dev/usb/lp0").await?;
/// let mut enc = CommandEncoder::new();
/// enc.text("hello")?.cut(true, 3);
/// enc.close(&mut device).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeviceTransport {
    file: Option<File>,
    path: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open the device node for writing.
    ///
    /// ## Errors
    ///
    /// Returns [`ImpresoraError::Transfer`] if the node does not exist or
    /// the process lacks permission to write to it.
    pub async fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let path = device.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .await
            .map_err(|e| {
                ImpresoraError::Transfer(format!("Failed to open {}: {}", path.display(), e))
            })?;

        log::info!("Opened printer device {}", path.display());

        Ok(Self {
            file: Some(file),
            path,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Open [`DEFAULT_DEVICE`].
    pub async fn open_default() -> Result<Self> {
        Self::open(DEFAULT_DEVICE).await
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Transport for DeviceTransport {
    async fn transfer(&mut self, data: &[u8]) -> Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            ImpresoraError::Transfer(format!("{} is closed", self.path.display()))
        })?;

        log::debug!("Writing {} bytes to {}", data.len(), self.path.display());

        for (i, chunk) in data.chunks(self.chunk_size).enumerate() {
            if i > 0 && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
            file.write_all(chunk)
                .await
                .map_err(|e| ImpresoraError::Transfer(format!("Write failed: {}", e)))?;
        }

        file.flush()
            .await
            .map_err(|e| ImpresoraError::Transfer(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .await
                .map_err(|e| ImpresoraError::Transfer(format!("Flush failed: {}", e)))?;
            log::info!("Closed printer device {}", self.path.display());
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
