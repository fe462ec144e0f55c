//! Runtime bridge between UI command queue and the form controller.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::GuiController;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    controller: Arc<GuiController>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("predictor-backend".to_string())
        .spawn(move || run(cmd_rx, ui_tx, controller))
}

fn run(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, controller: Arc<GuiController>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(format!(
                "backend worker startup failure: failed to build runtime: {err}"
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    runtime.block_on(async move {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Submit => {
                    let controller = Arc::clone(&controller);
                    tokio::spawn(async move {
                        let outcome = controller.submit().await;
                        tracing::debug!(?outcome, "submit finished");
                    });
                }
                BackendCommand::Reset => controller.reset(),
            }
        }
        tracing::info!("ui command channel closed; backend worker exiting");
    });
}
