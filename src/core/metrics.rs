use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    if PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

/// `stage` is `submission` for first evaluations and `followup` for re-evaluations.
pub(crate) fn record_evaluation(stage: &'static str, final_score: f64) {
    metrics::counter!("assignments_evaluated_total", "stage" => stage).increment(1);
    metrics::histogram!("assignment_final_score", "stage" => stage).record(final_score);
}
