//! Structured logging module for request tracing
//!
//! Provides the tracing filter construction used at startup and the
//! request ID generation used to correlate admission decisions in logs.

use uuid::Uuid;

/// EnvFilter directive string for the configured levels.
///
/// Starts from the base level and appends one `turnstile::<component>`
/// directive per entry in `component_levels`, so a single module can be
/// turned up to debug without flooding the rest of the log.
///
/// # Examples
///
/// ```
/// use turnstile::config::logging::LoggingConfig;
/// use turnstile::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("probe".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: turnstile::config::logging::LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,turnstile::probe=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",turnstile::{}={}", component, level));
        }
    }

    filter_str
}

/// Fresh correlation ID for one admission decision.
///
/// Ties the decision to its probe fetch and scaling computation in the
/// logs.
///
/// # Examples
///
/// ```
/// use turnstile::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    #[test]
    fn test_build_filter_base_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_build_filter_with_component_level() {
        let mut component_levels = std::collections::HashMap::new();
        component_levels.insert("qos".to_string(), "trace".to_string());

        let config = LoggingConfig {
            level: "info".to_string(),
            component_levels: Some(component_levels),
            ..Default::default()
        };

        assert_eq!(build_filter_directives(&config), "info,turnstile::qos=trace");
    }

    #[test]
    fn test_request_id_has_uuid_shape() {
        let id = generate_request_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|&c| c == '-').count(), 4);
    }

    #[test]
    fn test_request_ids_do_not_repeat() {
        let id1 = generate_request_id();
        let id2 = generate_request_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_request_id_round_trips_through_parser() {
        let id = generate_request_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
