//! Command dispatch task.
//!
//! Receives encoded commands from the panel over a channel and posts them to
//! the backend one by one. A failed post is logged and dropped; the panel has
//! already moved on.
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::Receiver;

use super::net_task::Backend;
use crate::robot::commands::Command;

/// Runs until every sender is dropped. Returns how many commands the backend accepted.
pub async fn dispatch_task(backend: Arc<dyn Backend>, mut cmd_receiver: Receiver<Command>) -> usize {
    let stamp = "[DISPATCH_TASK]";
    let mut accepted = 0;

    while let Some(cmd) = cmd_receiver.recv().await {
        let line = cmd.encode();
        debug!("{stamp} sending {line}");
        match backend.send_command(&cmd).await {
            Ok(result) => {
                accepted += 1;
                debug!("{stamp} {line} -> {result}");
            }
            Err(e) => warn!("{stamp} {line} failed: {e}"),
        }
    }

    info!("{stamp} channel closed after {accepted} commands");
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::state::Vec3;
    use crate::tasks::mock::MockBackend;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn forwards_commands_in_order() {
        let backend = Arc::new(MockBackend::default());
        let (tx, rx) = mpsc::channel(4);
        let task = tokio::spawn(dispatch_task(backend.clone(), rx));

        tx.send(Command::Attitude(Vec3::new(3, 0, 0))).await.unwrap();
        tx.send(Command::CalibrationSave).await.unwrap();
        drop(tx);

        assert_eq!(task.await.unwrap(), 2);
        assert_eq!(
            backend.sent(),
            vec!["CMD_ATTITUDE#3#0#0".to_string(), "CMD_CALIBRATION#save".to_string()]
        );
    }
}
