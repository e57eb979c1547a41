//! Backend worker: owns a tokio runtime and the job list controller, turns
//! queued UI commands into controller intents, and pushes view snapshots back.

use std::{
    future::Future,
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{ClientSettings, FetchOutcome, JobListController, JobListEvent};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker for the configured job source. Returns `None`
/// after reporting a configuration error to the UI.
pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> Option<JoinHandle<()>> {
    match JobListController::from_settings(&settings) {
        Ok(controller) => Some(launch_with_controller(controller, cmd_rx, ui_tx)),
        Err(err) => {
            tracing::error!("failed to configure job source: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Configuration,
                err.to_string(),
            )));
            None
        }
    }
}

pub fn launch_with_controller(
    controller: Arc<JobListController>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || run_worker(controller, cmd_rx, ui_tx))
}

fn run_worker(
    controller: Arc<JobListController>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let mut events = controller.subscribe();
        let forward_controller = controller.clone();
        let forward_tx = ui_tx.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(JobListEvent::Unmounted) | Err(RecvError::Closed) => break,
                    Ok(_) | Err(RecvError::Lagged(_)) => {
                        let view = forward_controller.view().await;
                        let _ = forward_tx.try_send(UiEvent::ViewUpdated(view));
                    }
                }
            }
        });

        let _ = ui_tx.try_send(UiEvent::ViewUpdated(controller.view().await));
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        // Intents run as tasks so the loop keeps draining commands while a
        // page is loading; the controller skips the ones that arrive too early.
        while let Ok(cmd) = cmd_rx.recv() {
            let name = cmd.name();
            let controller = controller.clone();
            match cmd {
                BackendCommand::Mount => {
                    spawn_intent(name, async move { controller.on_mount().await });
                }
                BackendCommand::EndReached => {
                    spawn_intent(name, async move { controller.on_end_reached().await });
                }
                BackendCommand::Retry => {
                    spawn_intent(name, async move { controller.on_retry().await });
                }
                BackendCommand::Scrolled(metrics) => {
                    // Positions go through the detector in command order; only
                    // the resulting fetch leaves the loop.
                    if controller.observe_scroll(metrics).await {
                        spawn_intent(name, async move { controller.on_end_reached().await });
                    }
                }
                BackendCommand::Unmount => break,
            }
        }

        controller.unmount();
        tracing::info!("backend: worker stopped");
    });
}

fn spawn_intent<F>(name: &'static str, intent: F)
where
    F: Future<Output = FetchOutcome> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = intent.await;
        tracing::debug!(command = name, ?outcome, "backend: intent handled");
    });
}
