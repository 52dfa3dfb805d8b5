//! Clients command implementation

use crate::cli::output::{format_clients_json, format_clients_table, ClientLimitView};
use crate::cli::ClientsListArgs;
use crate::config::TurnstileConfig;
use colored::Colorize;

/// Handle `turnstile clients list` command
pub fn handle_clients_list(args: &ClientsListArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        TurnstileConfig::load(Some(&args.config))?
    } else {
        TurnstileConfig::default()
    };

    let mut clients: Vec<ClientLimitView> = config
        .clients
        .limits
        .iter()
        .map(|(client, quota)| ClientLimitView {
            client: client.clone(),
            base_quota: *quota,
        })
        .collect();
    clients.sort_by(|a, b| a.client.cmp(&b.client));

    if args.json {
        return Ok(format_clients_json(&clients));
    }

    if clients.is_empty() {
        return Ok(format!(
            "No client quotas configured in {}. All clients are {}.",
            args.config.display(),
            "unbounded".yellow()
        ));
    }

    let mut output = format_clients_table(&clients);
    output.push('\n');
    output.push_str("Clients not listed are unbounded.");
    Ok(output)
}
