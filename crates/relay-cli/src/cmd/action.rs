use crate::output::{print_json, print_table, truncate};
use clap::Args;
use relay_core::action::{parse_header, Action, ActionUpdate, Headers, NewAction};
use relay_core::config::Config;
use relay_core::Relay;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Unique name for the action
    #[arg(long)]
    pub name: String,

    /// URL for the action
    #[arg(long)]
    pub url: String,

    /// HTTP method to use
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// Header in "Key:Value" format (repeatable)
    #[arg(long = "header", value_name = "KEY:VALUE", value_parser = header_arg)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// ID of the action to edit
    #[arg(long)]
    pub id: String,

    /// New name for the action
    #[arg(long)]
    pub name: Option<String>,

    /// New URL for the action
    #[arg(long)]
    pub url: Option<String>,

    /// New HTTP method
    #[arg(long)]
    pub method: Option<String>,

    /// Header in "Key:Value" format (repeatable); replaces all existing headers
    #[arg(long = "header", value_name = "KEY:VALUE", value_parser = header_arg)]
    pub headers: Vec<(String, String)>,

    /// New request body
    #[arg(long)]
    pub body: Option<String>,
}

fn header_arg(raw: &str) -> Result<(String, String), String> {
    parse_header(raw).ok_or_else(|| "invalid header format, expected Key:Value".to_string())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn add(config: &Config, args: AddArgs, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    let mut new = NewAction::new(args.name, args.url).with_method(args.method);
    if !args.headers.is_empty() {
        new = new.with_headers(args.headers.into_iter().collect());
    }
    if let Some(body) = args.body {
        new = new.with_body(body);
    }
    let action = relay.create_action(new)?;
    if json {
        print_json(&action)?;
    } else {
        println!("Added action:");
        print_action(&action);
    }
    Ok(())
}

pub fn edit(config: &Config, args: EditArgs, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    let headers: Option<Headers> = if args.headers.is_empty() {
        None
    } else {
        Some(args.headers.into_iter().collect())
    };
    let update = ActionUpdate {
        name: args.name,
        url: args.url,
        method: args.method,
        headers,
        body: args.body,
    };
    let action = relay.update_action(&args.id, update)?;
    if json {
        print_json(&action)?;
    } else {
        println!("Edited action:");
        print_action(&action);
    }
    Ok(())
}

pub fn delete(config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    relay.delete_action(id)?;
    if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("Deleted action with id: {id}");
    }
    Ok(())
}

pub fn list(config: &Config, json: bool) -> anyhow::Result<()> {
    let relay = Relay::open(config);
    let mut actions = relay.list_actions();
    actions.sort_by(|a, b| a.name.cmp(&b.name));
    if json {
        return print_json(&actions);
    }
    if actions.is_empty() {
        println!("No actions found.");
        return Ok(());
    }
    print_table(
        &["ID", "NAME", "METHOD", "URL"],
        actions
            .iter()
            .map(|a| {
                vec![
                    a.id.clone(),
                    a.name.clone(),
                    a.method.clone(),
                    truncate(&a.url, 60),
                ]
            })
            .collect(),
    );
    Ok(())
}

fn print_action(action: &Action) {
    println!("ID:      {}", action.id);
    println!("Name:    {}", action.name);
    println!("URL:     {}", action.url);
    println!("Method:  {}", action.method);
    if action.headers.is_empty() {
        println!("Headers: (none)");
    } else {
        println!("Headers:");
        for (key, value) in &action.headers {
            println!("  {key}: {value}");
        }
    }
    println!("Body:    {}", action.body);
}
