use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, debug, info_span, Instrument};
use crate::state::AppState;

/// Periodically clears reset tokens whose expiry has passed so a stale token
/// never lingers on an account record.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting reset token sweeper...");

    let interval = Duration::from_secs(state.config.reset_sweep_interval_secs.max(1));

    loop {
        sweep_expired_reset_tokens(&state)
            .instrument(info_span!("reset_token_sweep"))
            .await;
        sleep(interval).await;
    }
}

pub async fn sweep_expired_reset_tokens(state: &AppState) -> u64 {
    match state.user_repo.clear_expired_reset_tokens(Utc::now()).await {
        Ok(0) => {
            debug!("No expired reset tokens");
            0
        }
        Ok(cleared) => {
            info!(cleared, "Cleared expired reset tokens");
            cleared
        }
        Err(e) => {
            error!("Failed to clear expired reset tokens: {:?}", e);
            0
        }
    }
}
