//! Probe command implementation
//!
//! One-shot fetch against the configured health backend. The point is
//! operator diagnosis: distinguishing "the backend is down" from "the
//! backend answers with something the gauge contract does not allow"
//! without reading server logs.

use crate::cli::ProbeArgs;
use crate::config::TurnstileConfig;
use crate::probe::{HealthProbe, HttpHealthProbe, ProbeError};
use colored::Colorize;
use serde_json::json;
use std::time::Instant;

/// Handle `turnstile probe` command
pub async fn handle_probe(args: &ProbeArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = TurnstileConfig::load(Some(&args.config))?;
    config.validate()?;

    let backend = config.health_backend.as_ref().ok_or_else(|| {
        format!(
            "No [health_backend] section in {}; nothing to probe.",
            args.config.display()
        )
    })?;

    let probe = HttpHealthProbe::new(backend);
    let started = Instant::now();
    let result = probe.fetch().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    Ok(format_probe_result(probe.url(), &result, latency_ms, args.json))
}

fn format_probe_result(
    url: &str,
    result: &Result<u64, ProbeError>,
    latency_ms: u64,
    as_json: bool,
) -> String {
    if as_json {
        let value = match result {
            Ok(reading) => json!({
                "ok": true,
                "url": url,
                "reading": reading,
                "latency_ms": latency_ms,
            }),
            Err(ProbeError::Unavailable { reason }) => json!({
                "ok": false,
                "url": url,
                "kind": "unavailable",
                "detail": reason,
                "latency_ms": latency_ms,
            }),
            Err(ProbeError::InvalidReading { detail }) => json!({
                "ok": false,
                "url": url,
                "kind": "invalid_reading",
                "detail": detail,
                "latency_ms": latency_ms,
            }),
        };
        return serde_json::to_string_pretty(&value).unwrap();
    }

    match result {
        Ok(reading) => format!(
            "{} {} answered in {}ms\n  reading: {}",
            "✓".green(),
            url,
            latency_ms,
            reading
        ),
        Err(ProbeError::Unavailable { reason }) => format!(
            "{} {} unavailable after {}ms\n  {}\n  Quota scaling is inert; clients receive unscaled base quotas.",
            "✗".red(),
            url,
            latency_ms,
            reason
        ),
        Err(ProbeError::InvalidReading { detail }) => format!(
            "{} {} answered, but the reading is unusable\n  {}\n  This is a contract violation worth fixing on the backend side.",
            "✗".red(),
            url,
            detail
        ),
    }
}
