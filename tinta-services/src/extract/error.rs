// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for palette extraction.

use std::time::Duration;

use thiserror::Error;
use tinta_theme::error::ThemeError;

/// Errors that can occur while turning an image into a theme.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The image could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image contained no usable pixels.
    #[error("Image has no opaque pixels to sample")]
    NoPixels,

    /// Extraction did not finish in time.
    #[error("Extraction timed out after {0:?}")]
    TimedOut(Duration),

    /// The blocking extraction task panicked or was cancelled.
    #[error("Task execution error: {0}")]
    Join(String),

    /// A palette was produced but could not be themed.
    #[error("Theme derivation failed: {0}")]
    Theme(#[from] ThemeError),

    /// The executor has shut down.
    #[error("Theme executor is no longer running")]
    ExecutorClosed,
}

impl From<tokio::task::JoinError> for ExtractError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}
