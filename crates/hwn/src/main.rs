use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use hwn_core::{
    config::Config,
    notifier::Notifier,
    poller::{PollState, Poller},
};
use hwn_practicum::PracticumClient;
use hwn_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> Result<(), hwn_core::Error> {
    hwn_core::config::load_dotenv();
    hwn_core::logging::init("hwn", hwn_core::logging::log_file_from_env().as_deref());
    tracing::info!("homework notifier starting");

    // Credentials first: nothing touches the network without them.
    let cfg = Config::load()?;
    tracing::debug!("{cfg:?}");

    let api = Arc::new(PracticumClient::new(
        cfg.endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.request_timeout,
    )?);
    tracing::info!("review api: {}", api.endpoint());
    let messenger = TelegramMessenger::from_token(cfg.telegram_token.clone(), cfg.request_timeout)?;
    match messenger.username().await {
        Ok(name) => tracing::info!("telegram bot: @{name}"),
        Err(e) => tracing::warn!("could not fetch bot info: {e}"),
    }

    let notifier = Notifier::new(Arc::new(messenger), cfg.telegram_chat_id.clone());
    let poller = Poller::new(api, notifier, cfg.retry_period);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received, shutting down");
                    cancel.cancel();
                }
                Err(e) => tracing::warn!("cannot listen for ctrl-c: {e}"),
            }
        }
    });

    poller.run(PollState::starting_now(), cancel).await;
    Ok(())
}
