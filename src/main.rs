use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use eyre::{Context, Result};
use tasklist::app::services::{ActionService, EventService, ShutdownCoordinator};
use tasklist::config::{Configuration, init_logger, verbose};
use tasklist::models::Action;
use tasklist::remote::new_remote;
use tasklist::sync::ListSyncClient;
use tasklist::{
    app::{App, destruct_terminal_for_panic},
    cli::Command,
};
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    let notice_duration = config.general.notice_duration();
    Configuration::init(config).wrap_err("initializing configuration")?;
    verbose!("[+] Logger initialized");

    verbose!("[+] Initializing remote...");
    let remote = new_remote(&Configuration::instance().remote).wrap_err("initializing remote")?;
    verbose!("[+] Remote initialized");

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

    let mut events = EventService::new();

    let mut task_set = task::JoinSet::new();
    let token = CancellationToken::new();
    let pending_tasks = Arc::new(AtomicUsize::new(0));

    let mut action_service = ActionService::new(
        Arc::new(events.event_tx()),
        action_rx,
        remote,
        token.clone(),
        pending_tasks.clone(),
    );
    task_set.spawn(async move { action_service.run().await });

    let mut sync = ListSyncClient::new(action_tx).with_notice_duration(notice_duration);
    verbose!("[+] Fetching tasks...");
    sync.load();

    let mut app = App::new(&mut events, sync, token.clone());

    let shutdown = ShutdownCoordinator::new(pending_tasks.clone());

    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    // In-flight writes keep the process alive until they land
    if let Err(err) = shutdown.wait().await {
        eprintln!("Shutdown error: {}", err);
    }

    task_set.abort_all();
    while let Some(res) = task_set.join_next().await {
        if let Err(err) = res {
            if !err.is_cancelled() {
                log::error!("Task error: {}", err);
            }
        }
    }

    Ok(())
}
