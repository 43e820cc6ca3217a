//! `watch`: live score view driven by the change notifier.
//!
//! Subscribes once, renders the scores immediately (subscriptions fire on
//! registration), then re-renders every time the server's change marker
//! moves. Runs until Ctrl+C / SIGTERM or until the notifier shuts down.

use chrono::Local;
use tracing::{debug, info, warn};

use scoreboard_core::Scoreboard;
use scoreboard_core::api::ScorableId;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::scores;

pub async fn handle(
    session: &Scoreboard,
    scorable: String,
    limit: Option<usize>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let scorable_id = ScorableId::new(scorable);
    let color = output::should_color(&global.color);
    let mut subscription = session.watch().await;

    info!(
        scorable = %scorable_id,
        interval = ?session.notifier().poll_interval(),
        "watching for changes"
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            changed = subscription.changed() => {
                let Some(generation) = changed else {
                    debug!("change notifier stopped");
                    break;
                };
                match scores::render_scores(session, &scorable_id, limit, &global.output).await {
                    Ok(out) => {
                        if !global.quiet {
                            let banner = format!(
                                "── {} (change #{generation}) ──",
                                Local::now().format("%H:%M:%S")
                            );
                            eprintln!("{}", output::muted(&banner, color));
                        }
                        output::print_output(&out, global.quiet);
                    }
                    // Keep watching; the next change gets another attempt.
                    Err(e) => warn!(error = %e, "failed to refresh scores"),
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        debug!("received Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                debug!("received terminate signal");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
