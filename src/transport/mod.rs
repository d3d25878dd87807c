//! # Printer Transport Layer
//!
//! The encoder never talks to hardware itself; [`CommandEncoder::flush`]
//! hands the finished buffer to a [`Transport`].
//!
//! ## Available Transports
//!
//! - [`device`]: Character device node (e.g. `/dev/usb/lp0`)
//! - [`MemoryTransport`]: Records every transfer, for tests and hex dumps
//!
//! [`CommandEncoder::flush`]: crate::encoder::CommandEncoder::flush

use async_trait::async_trait;

use crate::error::{ImpresoraError, Result};

pub mod device;

pub use device::DeviceTransport;

/// A byte sink that delivers print jobs to a printer.
#[async_trait]
pub trait Transport: Send {
    /// Send one block of bytes. Called once per flush, even for an empty
    /// buffer.
    async fn transfer(&mut self, data: &[u8]) -> Result<()>;

    /// Release the connection. The default does nothing.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// # In-Memory Transport
///
/// Keeps every transfer as a separate block. Can be told to fail, to
/// exercise error paths.
///
/// ## Example
///
/// ```
/// use impresora::transport::{MemoryTransport, Transport};
///
/// # tokio_test_block(async {
/// let mut t = MemoryTransport::new();
/// t.transfer(b"hi").await.unwrap();
/// assert_eq!(t.transfers(), &[b"hi".to_vec()]);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryTransport {
    transfers: Vec<Vec<u8>>,
    fail_with: Option<String>,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every transfer fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Every transfer received so far, in order.
    pub fn transfers(&self) -> &[Vec<u8>] {
        &self.transfers
    }

    /// All transferred bytes concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.transfers.concat()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn transfer(&mut self, data: &[u8]) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(ImpresoraError::Transfer(reason.clone()));
        }
        self.transfers.push(data.to_vec());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
