//! Output formatting helpers for CLI commands

use crate::config::UNBOUNDED_QUOTA;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for client quota display
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClientLimitView {
    pub client: String,
    pub base_quota: u64,
}

/// Render a quota for humans. The sentinel reads as "unbounded".
pub fn format_quota(quota: u64) -> String {
    if quota == UNBOUNDED_QUOTA {
        "unbounded".to_string()
    } else {
        quota.to_string()
    }
}

/// Format client limits as a table
pub fn format_clients_table(clients: &[ClientLimitView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Client", "Base Quota"]);

    for c in clients {
        table.add_row(vec![
            Cell::new(&c.client),
            Cell::new(format_quota(c.base_quota)),
        ]);
    }

    table.to_string()
}

/// Format client limits as JSON
pub fn format_clients_json(clients: &[ClientLimitView]) -> String {
    serde_json::to_string_pretty(&json!({
        "clients": clients
    }))
    .unwrap()
}
