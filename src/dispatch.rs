//! Task dispatch boundary
//!
//! The core is driven by a transport that hands over a task name and a
//! payload and expects a pixel buffer or an error back. Recognized tasks are
//! a closed set: [`TaskRequest`] models them as an enum that [`run_task`]
//! matches exhaustively, while [`TaskEnvelope`] keeps the string-keyed wire
//! shape and is where an unrecognized name becomes [`TaskError::UnknownTask`].
//!
//! Ownership of the produced buffer moves to the caller with the reply; the
//! core retains nothing across calls.

use crate::filters::grayscale::to_grayscale;
use crate::models::{BufferSizeMismatch, PixelBuffer, Quad};
use crate::pipeline::enhance;
use crate::warp::warp_perspective;
use thiserror::Error;

/// Wire name of the perspective warp task
pub const TASK_PERSPECTIVE_TRANSFORM: &str = "perspectiveTransform";
/// Wire name of the black-and-white enhancement task
pub const TASK_ENHANCE_B_AND_W: &str = "enhanceBAndW";
/// Wire name of the grayscale conversion task
pub const TASK_GRAYSCALE: &str = "grayscale";

/// Failure replies produced at the dispatch boundary
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task identifier outside the recognized set
    #[error("unknown task: {0}")]
    UnknownTask(String),
    /// Recognized task with a missing or degenerate payload field
    #[error("invalid payload for {task}: {reason}")]
    InvalidPayload {
        /// Wire name of the task that rejected its payload.
        task: &'static str,
        /// Human-readable description of what was wrong.
        reason: String,
    },
    /// Raw pixel data disagreed with its stated dimensions
    #[error(transparent)]
    Buffer(#[from] BufferSizeMismatch),
}

/// A parsed, fully-typed unit of work
#[derive(Debug, Clone)]
pub enum TaskRequest {
    /// Dewarp the quadrilateral under `corners` onto a rectangle
    PerspectiveTransform {
        /// Source image.
        image: PixelBuffer,
        /// Source-space corner correspondences.
        corners: Quad,
        /// Output width in pixels (must be >= 1).
        dest_width: usize,
        /// Output height in pixels (must be >= 1).
        dest_height: usize,
    },
    /// Enhance a document photo into a binarized scan
    EnhanceBlackWhite {
        /// Source image.
        image: PixelBuffer,
    },
    /// Convert to grayscale
    Grayscale {
        /// Source image.
        image: PixelBuffer,
    },
}

/// Successful reply: the produced buffer, owned by the caller
#[derive(Debug, Clone)]
pub struct TaskReply {
    /// Result image; its own width/height describe the output dimensions.
    pub image: PixelBuffer,
}

/// The string-keyed wire shape of an incoming task
#[derive(Debug, Clone)]
pub struct TaskEnvelope {
    /// Task identifier as it appeared on the wire.
    pub task: String,
    /// Source image.
    pub image: PixelBuffer,
    /// Flat corner list for `perspectiveTransform`.
    pub corners: Option<[f32; 8]>,
    /// Destination width for `perspectiveTransform`.
    pub dest_width: Option<usize>,
    /// Destination height for `perspectiveTransform`.
    pub dest_height: Option<usize>,
}

impl TaskEnvelope {
    /// Envelope around an already-decoded image
    pub fn new(task: impl Into<String>, image: PixelBuffer) -> Self {
        Self {
            task: task.into(),
            image,
            corners: None,
            dest_width: None,
            dest_height: None,
        }
    }

    /// Envelope around raw RGBA8 bytes, validating their length
    pub fn from_raw_image(
        task: impl Into<String>,
        width: usize,
        height: usize,
        data: Vec<u8>,
    ) -> Result<Self, TaskError> {
        Ok(Self::new(task, PixelBuffer::from_raw(width, height, data)?))
    }

    /// Attach the flat corner list
    pub fn with_corners(mut self, corners: [f32; 8]) -> Self {
        self.corners = Some(corners);
        self
    }

    /// Attach the destination dimensions
    pub fn with_dest_size(mut self, width: usize, height: usize) -> Self {
        self.dest_width = Some(width);
        self.dest_height = Some(height);
        self
    }

    /// Resolve the wire name into a typed request.
    ///
    /// Unrecognized names fail with [`TaskError::UnknownTask`]; recognized
    /// names with missing fields fail with [`TaskError::InvalidPayload`].
    pub fn parse(self) -> Result<TaskRequest, TaskError> {
        match self.task.as_str() {
            TASK_PERSPECTIVE_TRANSFORM => {
                let corners = self.corners.ok_or(TaskError::InvalidPayload {
                    task: TASK_PERSPECTIVE_TRANSFORM,
                    reason: "missing corners".into(),
                })?;
                let dest_width = self.dest_width.ok_or(TaskError::InvalidPayload {
                    task: TASK_PERSPECTIVE_TRANSFORM,
                    reason: "missing destination width".into(),
                })?;
                let dest_height = self.dest_height.ok_or(TaskError::InvalidPayload {
                    task: TASK_PERSPECTIVE_TRANSFORM,
                    reason: "missing destination height".into(),
                })?;
                Ok(TaskRequest::PerspectiveTransform {
                    image: self.image,
                    corners: Quad::from_flat(corners),
                    dest_width,
                    dest_height,
                })
            }
            TASK_ENHANCE_B_AND_W => Ok(TaskRequest::EnhanceBlackWhite { image: self.image }),
            TASK_GRAYSCALE => Ok(TaskRequest::Grayscale { image: self.image }),
            _ => Err(TaskError::UnknownTask(self.task.clone())),
        }
    }
}

impl TaskRequest {
    /// Wire name of this request
    pub fn task_name(&self) -> &'static str {
        match self {
            TaskRequest::PerspectiveTransform { .. } => TASK_PERSPECTIVE_TRANSFORM,
            TaskRequest::EnhanceBlackWhite { .. } => TASK_ENHANCE_B_AND_W,
            TaskRequest::Grayscale { .. } => TASK_GRAYSCALE,
        }
    }

    /// Run the request to completion.
    ///
    /// Either fully completes with a populated buffer or fails; there are no
    /// partial results and no retries.
    pub fn run(self) -> Result<TaskReply, TaskError> {
        if cfg!(debug_assertions) && crate::debug::debug_enabled() {
            eprintln!(
                "DISPATCH: {} on {}x{} image",
                self.task_name(),
                self.source().width(),
                self.source().height()
            );
        }

        match self {
            TaskRequest::PerspectiveTransform {
                image,
                corners,
                dest_width,
                dest_height,
            } => {
                if dest_width == 0 || dest_height == 0 {
                    return Err(TaskError::InvalidPayload {
                        task: TASK_PERSPECTIVE_TRANSFORM,
                        reason: format!(
                            "destination dimensions must be positive, got {dest_width}x{dest_height}"
                        ),
                    });
                }
                Ok(TaskReply {
                    image: warp_perspective(&image, &corners, dest_width, dest_height),
                })
            }
            TaskRequest::EnhanceBlackWhite { image } => Ok(TaskReply {
                image: enhance(&image),
            }),
            TaskRequest::Grayscale { image } => Ok(TaskReply {
                image: to_grayscale(&image),
            }),
        }
    }

    fn source(&self) -> &PixelBuffer {
        match self {
            TaskRequest::PerspectiveTransform { image, .. } => image,
            TaskRequest::EnhanceBlackWhite { image } => image,
            TaskRequest::Grayscale { image } => image,
        }
    }
}

/// Run a typed request; equivalent to [`TaskRequest::run`].
pub fn run_task(request: TaskRequest) -> Result<TaskReply, TaskError> {
    request.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_task() {
        let envelope = TaskEnvelope::new("sharpen", PixelBuffer::new(2, 2));
        match envelope.parse() {
            Err(TaskError::UnknownTask(name)) => assert_eq!(name, "sharpen"),
            other => panic!("expected UnknownTask, got {other:?}"),
        }
    }

    #[test]
    fn test_grayscale_task_roundtrip() {
        let image = PixelBuffer::filled(3, 2, [200, 50, 25, 255]);
        let request = TaskEnvelope::new(TASK_GRAYSCALE, image.clone())
            .parse()
            .unwrap();
        let reply = run_task(request).unwrap();
        assert_eq!(reply.image.width(), 3);
        assert_eq!(reply.image.height(), 2);
        let px = reply.image.get(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_perspective_requires_corners() {
        let envelope = TaskEnvelope::new(TASK_PERSPECTIVE_TRANSFORM, PixelBuffer::new(4, 4))
            .with_dest_size(2, 2);
        assert!(matches!(
            envelope.parse(),
            Err(TaskError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_perspective_rejects_zero_destination() {
        let request = TaskEnvelope::new(TASK_PERSPECTIVE_TRANSFORM, PixelBuffer::new(4, 4))
            .with_corners([0.0, 0.0, 3.0, 0.0, 3.0, 3.0, 0.0, 3.0])
            .with_dest_size(0, 2)
            .parse()
            .unwrap();
        assert!(matches!(
            request.run(),
            Err(TaskError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_from_raw_image_length_mismatch() {
        let result = TaskEnvelope::from_raw_image(TASK_GRAYSCALE, 2, 2, vec![0u8; 10]);
        assert!(matches!(result, Err(TaskError::Buffer(_))));
    }

    #[test]
    fn test_task_names() {
        let image = PixelBuffer::new(1, 1);
        let request = TaskEnvelope::new(TASK_ENHANCE_B_AND_W, image).parse().unwrap();
        assert_eq!(request.task_name(), "enhanceBAndW");
    }
}
