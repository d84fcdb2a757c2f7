//! scanform - document scan enhancement and perspective correction
//!
//! A pure Rust pixel-processing engine for document scanning: dewarping a
//! photographed page onto a rectangular image, and enhancing a color or
//! grayscale photo into a clean black-and-white scan. All algorithms are
//! synchronous pure functions over owned [`PixelBuffer`] values; decoding
//! and encoding image files is kept at the boundary.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Task dispatch boundary (typed requests, wire envelope, errors)
pub mod dispatch;
/// Per-pixel filters (grayscale, brightness, bilateral, adaptive threshold)
pub mod filters;
/// Core data structures (PixelBuffer, Point, Quad, Sample)
pub mod models;
/// Fixed black-and-white enhancement pipeline
pub mod pipeline;
/// File I/O and diagnostic helpers for the CLI and tests
pub mod tools;
/// Bilinear resampling and perspective warping
pub mod warp;

mod debug;

pub use dispatch::{TaskEnvelope, TaskError, TaskReply, TaskRequest, run_task};
pub use models::{BufferSizeMismatch, PixelBuffer, Point, Quad, Sample};
pub use pipeline::{enhance, enhance_parallel};
pub use warp::{warp_perspective, warp_perspective_parallel};
