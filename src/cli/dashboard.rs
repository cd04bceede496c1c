use super::{Panel, Services, render_panel, ui};
use crate::core::config::AppConfig;
use anyhow::Result;
use futures::future::join_all;
use tracing::warn;

/// Renders every panel once. A panel that fails is reported in place and the
/// rest of the dashboard is still shown.
pub async fn run(services: &Services, config: &AppConfig) -> Result<()> {
    let pb = ui::new_progress_bar(Panel::ALL.len() as u64, false);
    let panel_futures = Panel::ALL.iter().map(|panel| {
        let pb_clone = pb.clone();
        async move {
            let res = render_panel(*panel, services, config).await;
            pb_clone.inc(1);
            (*panel, res)
        }
    });
    let results = join_all(panel_futures).await;
    pb.finish_and_clear();

    let num_panels = results.len();
    for (i, (panel, result)) in results.into_iter().enumerate() {
        println!(
            "\n{}\n",
            ui::style_text(&panel.to_string(), ui::StyleType::Title)
        );
        match result {
            Ok(output) => println!("{output}"),
            Err(e) => {
                warn!(panel = %panel, error = %e, "Skipping panel");
                println!(
                    "{}",
                    ui::style_text(&format!("Unavailable: {e:#}"), ui::StyleType::Error)
                );
            }
        }

        if i < num_panels - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
