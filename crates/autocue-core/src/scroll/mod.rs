//! Autoscroll timing engine
//!
//! The engine owns scroll speed and play/pause state. A background task wakes
//! on a fixed period and, while playing, hands the distance to advance for that
//! tick to a caller-supplied callback. The engine never touches the viewport:
//! the callback owner applies the delta on whichever thread owns the view.
//!
//! # Layout
//!
//! - `timing` - Pure helpers (per-tick distance, clamped stepping)
//! - `engine` - `ScrollEngine`, the tick loop and its shared state
//!
//! # Usage
//!
//! ```ignore
//! use autocue_core::scroll::ScrollEngine;
//! use autocue_core::ScrollConfig;
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let engine = ScrollEngine::new(&ScrollConfig::default(), move |delta| {
//!     let _ = tx.send(delta);
//! });
//!
//! engine.play();
//! engine.speed_up();
//!
//! // On the UI side
//! while let Some(delta) = rx.recv().await {
//!     offset += delta;
//! }
//!
//! engine.stop().await;
//! ```

pub mod engine;
pub mod timing;

pub use engine::ScrollEngine;
