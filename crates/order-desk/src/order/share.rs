//! # Share & Export
//!
//! Ways an order text or an order link leaves the application: the clipboard and a LINE share
//! deep link. Clipboard failures are reported as `false` and never propagate.

use crate::model::CustomerId;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

const LINE_SHARE_BASE: &str = "https://line.me/R/share?text=";

/// LINE share link carrying `text` as the message body.
pub fn line_share_url(text: &str) -> String {
    format!("{}{}", LINE_SHARE_BASE, urlencoding::encode(text))
}

/// Link a customer opens to place orders. A trailing `/` on `base_url` is ignored.
pub fn customer_order_url(base_url: &str, customer_id: CustomerId) -> String {
    format!("{}/order/{}", base_url.trim_end_matches('/'), customer_id)
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// A place text can be copied to.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies `text`, returning whether it worked. Failures are logged.
pub async fn copy_to_clipboard(clipboard: &dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => {
            debug!(bytes = text.len(), "Copied to clipboard");
            true
        }
        Err(e) => {
            warn!(error = %e, "Clipboard write failed");
            false
        }
    }
}

/// Clipboard that keeps the last copied text in memory. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    broken: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write.
    pub fn unavailable() -> Self {
        Self {
            contents: Mutex::new(None),
            broken: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("permission denied".to_string()));
        }
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_line_share_url_percent_encodes_text() {
        assert_eq!(
            line_share_url("【注文内容】\n顧客名: A&B"),
            "https://line.me/R/share?text=%E3%80%90%E6%B3%A8%E6%96%87%E5%86%85%E5%AE%B9%E3%80%91%0A%E9%A1%A7%E5%AE%A2%E5%90%8D%3A%20A%26B"
        );
    }

    #[test]
    fn test_customer_order_url() {
        let id = Uuid::parse_str("8f14e45f-ceea-467f-a0e6-3c3f1b2e6a10").unwrap();
        assert_eq!(
            customer_order_url("https://shop.example", id),
            "https://shop.example/order/8f14e45f-ceea-467f-a0e6-3c3f1b2e6a10"
        );
        assert_eq!(
            customer_order_url("https://shop.example/", id),
            "https://shop.example/order/8f14e45f-ceea-467f-a0e6-3c3f1b2e6a10"
        );
    }

    #[tokio::test]
    async fn test_copy_reports_success_and_failure() {
        let clipboard = MemoryClipboard::new();
        assert!(copy_to_clipboard(&clipboard, "hello").await);
        assert_eq!(clipboard.contents().as_deref(), Some("hello"));

        let broken = MemoryClipboard::unavailable();
        assert!(!copy_to_clipboard(&broken, "hello").await);
        assert_eq!(broken.contents(), None);
    }
}
