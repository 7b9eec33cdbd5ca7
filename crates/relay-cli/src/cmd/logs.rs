use crate::output::{print_json, print_table, truncate};
use relay_core::config::Config;
use relay_core::Relay;

pub fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    let logs = relay.logs();
    if json {
        return print_json(&logs);
    }
    if logs.is_empty() {
        println!("No logs found.");
        return Ok(());
    }
    print_table(
        &["TIMESTAMP", "ACTION", "SUCCESS", "RESPONSE"],
        logs.iter()
            .map(|l| {
                vec![
                    l.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    l.action_id.clone(),
                    l.success.to_string(),
                    truncate(&l.response, 80),
                ]
            })
            .collect(),
    );
    Ok(())
}
