//! Object attribute commands

use anyhow::{bail, Result};
use clap::Subcommand;
use cmdb_client::{AttributeApi, Client, Cond, Condition, MapStr};
use colored::*;
use serde_json::Value;

#[derive(Subcommand)]
pub enum AttrCommands {
    /// Create an attribute
    #[command(about = "Create an object attribute and print its id")]
    Create {
        /// Attribute fields as a JSON object
        #[arg(short, long)]
        data: String,
    },

    /// Delete an attribute
    #[command(about = "Delete an object attribute by id")]
    Delete {
        /// Attribute id
        #[arg(long)]
        id: i64,
    },

    /// Update an attribute
    #[command(about = "Update fields of an object attribute by id")]
    Update {
        /// Attribute id
        #[arg(long)]
        id: i64,

        /// Fields to overwrite as a JSON object
        #[arg(short, long)]
        data: String,
    },

    /// Search attributes
    #[command(
        about = "Search object attributes",
        long_about = "Search object attributes.\nConditions come from --cond (a JSON object) and/or repeated --field key=value equality filters."
    )]
    Search {
        /// Condition as a JSON object
        #[arg(long)]
        cond: Option<String>,

        /// Equality filter, e.g. --field bk_obj_id=host
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
}

/// Parse `key=value`; the value is read as JSON when it parses, else as a string
fn parse_field(s: &str) -> Result<(String, Value), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(format!("Invalid field format: '{}'. Expected key=value", s));
    }
    let value = serde_json::from_str(parts[1]).unwrap_or_else(|_| Value::String(parts[1].into()));
    Ok((parts[0].to_string(), value))
}

fn parse_object(raw: &str) -> Result<MapStr> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        bail!("expected a JSON object, got: {}", raw);
    }
    Ok(MapStr::try_from(value)?)
}

fn build_condition(cond: Option<&str>, fields: Vec<(String, Value)>) -> Result<MapStr> {
    let base = match cond {
        Some(raw) => parse_object(raw)?,
        None => MapStr::new(),
    };

    let merged = fields
        .into_iter()
        .fold(Cond::new(), |c, (k, v)| c.field(k).eq(v))
        .to_map_str()
        .into_iter()
        .fold(base, |acc, (k, v)| acc.set(k, v));
    Ok(merged)
}

pub async fn handle_command(cmd: AttrCommands, client: &Client) -> Result<()> {
    let attrs = client.attribute();

    match cmd {
        AttrCommands::Create { data } => {
            let payload = parse_object(&data)?;
            let id = attrs.create_object_attribute(&payload).await?;
            println!("{} attribute created, id {}", "[OK]".green(), id);
        },
        AttrCommands::Delete { id } => {
            attrs
                .delete_object_attribute(&Cond::new().field("id").eq(id))
                .await?;
            println!("{} attribute {} deleted", "[OK]".green(), id);
        },
        AttrCommands::Update { id, data } => {
            let payload = parse_object(&data)?;
            attrs
                .update_object_attribute(&payload, &Cond::new().field("id").eq(id))
                .await?;
            println!("{} attribute {} updated", "[OK]".green(), id);
        },
        AttrCommands::Search { cond, fields } => {
            let condition = build_condition(cond.as_deref(), fields)?;
            let found = attrs.search_object_attributes(&condition).await?;
            println!("{}", serde_json::to_string_pretty(&found)?);
            println!("{} {} attribute(s)", "[OK]".green(), found.len());
        },
    }

    Ok(())
}
