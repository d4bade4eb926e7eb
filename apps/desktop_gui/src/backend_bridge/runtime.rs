//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker thread owns the controller. User actions and call completions
//! are applied in arrival order; API calls run as independent tasks so a
//! slow request never blocks the next action.

use std::{sync::Arc, thread};

use client_core::{
    perform, ApiCall, ClientSettings, CompanyApi, Completion, Controller, DateStyle, Effect,
    HttpCompanyApi,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

enum Input {
    Command(BackendCommand),
    Completed(Completion),
}

pub fn launch(
    settings: &ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let api = HttpCompanyApi::new(&settings.server_url)?;
    info!(server_url = %api.base_url(), "starting backend worker");
    Ok(spawn_worker(
        Arc::new(api),
        settings.date_style(),
        cmd_rx,
        ui_tx,
    )?)
}

pub fn spawn_worker<A>(
    api: Arc<A>,
    dates: DateStyle,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> std::io::Result<thread::JoinHandle<()>>
where
    A: CompanyApi + 'static,
{
    thread::Builder::new()
        .name("company-backend".to_string())
        .spawn(move || {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Fatal(format!(
                        "backend worker startup failure: failed to build runtime: {err}"
                    )));
                    error!("failed to build backend runtime: {err}");
                    return;
                }
            };
            runtime.block_on(run_worker(api, dates, cmd_rx, ui_tx));
            // The command forwarder may still be parked in a blocking recv.
            runtime.shutdown_background();
        })
}

async fn run_worker<A>(
    api: Arc<A>,
    dates: DateStyle,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) where
    A: CompanyApi + 'static,
{
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Input>();

    let forward_tx = input_tx.clone();
    tokio::task::spawn_blocking(move || loop {
        match cmd_rx.recv() {
            Ok(cmd) => {
                let stop = cmd == BackendCommand::Shutdown;
                if forward_tx.send(Input::Command(cmd)).is_err() || stop {
                    break;
                }
            }
            Err(_) => {
                let _ = forward_tx.send(Input::Command(BackendCommand::Shutdown));
                break;
            }
        }
    });

    let mut controller = Controller::new(dates);
    publish(&ui_tx, &controller);

    while let Some(input) = input_rx.recv().await {
        let effects = match input {
            Input::Command(BackendCommand::Shutdown) => {
                info!("backend worker shutting down");
                break;
            }
            Input::Command(BackendCommand::Dispatch(action)) => controller.handle(action),
            Input::Completed(completion) => controller.complete(completion),
        };
        for effect in effects {
            match effect {
                Effect::Call(call) => spawn_call(&api, call, &input_tx),
            }
        }
        publish(&ui_tx, &controller);
    }
}

fn spawn_call<A>(api: &Arc<A>, call: ApiCall, input_tx: &mpsc::UnboundedSender<Input>)
where
    A: CompanyApi + 'static,
{
    debug!(call = call.name(), "spawning api call");
    let api = Arc::clone(api);
    let input_tx = input_tx.clone();
    tokio::spawn(async move {
        let completion = perform(api.as_ref(), call).await;
        let _ = input_tx.send(Input::Completed(completion));
    });
}

fn publish(ui_tx: &Sender<UiEvent>, controller: &Controller) {
    match ui_tx.try_send(UiEvent::Render(Box::new(controller.view()))) {
        Ok(()) | Err(TrySendError::Disconnected(_)) => {}
        Err(TrySendError::Full(_)) => warn!("ui event queue full; dropping render"),
    }
}
