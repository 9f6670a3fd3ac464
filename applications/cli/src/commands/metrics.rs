/// `metrics` command
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output;
use admin_client::{AdminClient, RefreshTask, SnapshotStore};
use admin_core::{UserBackend, UserRecord};
use admin_view::MetricsAggregator;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fetch once and print the window counts
pub async fn show<B>(backend: &B, format: OutputFormat, out: &mut dyn Write) -> Result<()>
where
    B: UserBackend + ?Sized,
{
    let users = backend.list_users().await?;
    write_report(&users, format, out)
}

/// Re-render the counts on every refresh until `shutdown` resolves
///
/// Each fetch carries the session token current at that tick. On exit the
/// refresh task is stopped before the session is dropped, so no fetch runs
/// with a signed-out client.
pub async fn watch<F>(
    client: &AdminClient,
    period: Duration,
    format: OutputFormat,
    shutdown: F,
    out: &mut dyn Write,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let store = SnapshotStore::new();
    let mut snapshots = store.subscribe();
    let mut session = client.identity().subscribe();

    let task = RefreshTask::spawn(Arc::new(client.users()), store, period);
    info!(
        period_secs = period.as_secs(),
        affordance = output::affordance(session.borrow().as_ref()),
        "Watching registration metrics"
    );

    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("Stopping metrics watch");
                break Ok(());
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!("Refresh task ended");
                    break Ok(());
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    if let Err(e) = write_report(&snapshot.users, format, out) {
                        break Err(e);
                    }
                }
            }
            changed = session.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let label = output::affordance(session.borrow_and_update().as_ref());
                info!(affordance = label, "Session changed");
            }
        }
    };

    task.shutdown().await;
    client.identity().sign_out();
    result
}

fn write_report(users: &[UserRecord], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let report = MetricsAggregator::default().aggregate_now(users);
    match format {
        OutputFormat::Plain => write!(out, "{}", output::render_metrics(&report))?,
        OutputFormat::Json => writeln!(out, "{}", output::render_metrics_json(&report)?)?,
    }
    out.flush()?;
    Ok(())
}
