use super::{Panel, Services, render_panel, ui};
use crate::core::config::AppConfig;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Runs `task` immediately and then once per `period`, forever.
///
/// A failed run is logged and skipped; the next tick tries again. There is no
/// retry within a period.
pub fn spawn_refresh<F, Fut>(name: String, period: Duration, mut task: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            debug!(panel = %name, "Refreshing");
            if let Err(e) = task().await {
                warn!(panel = %name, error = %e, "Refresh failed, keeping previous display");
            }
        }
    })
}

/// Refreshes each panel on its own cadence until interrupted.
pub async fn run(services: Arc<Services>, config: Arc<AppConfig>) -> Result<()> {
    let handles: Vec<JoinHandle<()>> = Panel::ALL
        .iter()
        .map(|&panel| {
            let services = Arc::clone(&services);
            let config = Arc::clone(&config);
            let period = panel.refresh_interval(&config.refresh);
            info!(panel = %panel, ?period, "Scheduling refresh");

            spawn_refresh(panel.to_string(), period, move || {
                let services = Arc::clone(&services);
                let config = Arc::clone(&config);
                async move {
                    let output = render_panel(panel, &services, &config).await?;
                    println!(
                        "\n{}\n{output}",
                        ui::style_text(&panel.to_string(), ui::StyleType::Title)
                    );
                    Ok(())
                }
            })
        })
        .collect();

    tokio::signal::ctrl_c().await?;
    info!("Stopping refresh loops");
    for handle in handles {
        handle.abort();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_refresh_runs_immediately_then_every_period() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = spawn_refresh("test".to_string(), Duration::from_secs(60), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_secs(125)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_is_skipped_not_fatal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = spawn_refresh("flaky".to_string(), Duration::from_secs(10), move || {
            let counter = Arc::clone(&counter);
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n % 2 == 0 {
                    Err(anyhow!("upstream unavailable"))
                } else {
                    Ok(())
                }
            }
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(!handle.is_finished());
        handle.abort();
    }
}
