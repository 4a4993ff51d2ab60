//! Asynchronous backend plumbing for the panel.
//!
//! This module contains the tokio side of the panel, including:
//! - [`net_task`]: the [`net_task::Backend`] seam and its HTTP client.
//! - [`dispatch_task`]: drains the command channel into `POST /command`.
//! - [`poll_task`]: IMU polling and the calibration-mode wait.
//!
//! Tasks are spawned from `main.rs` and fed through tokio channels.
pub mod dispatch_task;
pub mod net_task;
pub mod poll_task;

#[cfg(test)]
pub(crate) mod mock;
