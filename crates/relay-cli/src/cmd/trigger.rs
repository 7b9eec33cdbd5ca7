use crate::output::print_json;
use clap::Args;
use relay_core::config::Config;
use relay_core::Relay;

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct TriggerArgs {
    /// ID of the action to trigger
    #[arg(long)]
    pub id: Option<String>,

    /// Name of the action to trigger
    #[arg(long)]
    pub name: Option<String>,
}

/// A failed dispatch is still a successful command: the outcome is printed,
/// not raised. Only unknown actions and unbuildable requests exit non-zero.
pub fn run(config: &Config, args: TriggerArgs, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    let outcome = match (args.id, args.name) {
        (Some(id), _) => relay.trigger_by_id(&id)?,
        (None, Some(name)) => relay.trigger_by_name(&name)?,
        (None, None) => anyhow::bail!("either --id or --name is required"),
    };
    if json {
        print_json(&outcome)?;
    } else {
        println!(
            "Action triggered. Success: {}, Response: {}",
            outcome.success, outcome.message
        );
    }
    Ok(())
}
