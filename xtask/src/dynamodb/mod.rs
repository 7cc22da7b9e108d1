//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use boatrent_core::rental::{boat_type_label, format_cents, generate_seed_boats};
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the boatrent tables.
    Deploy(DeployCommand),

    /// Seed the boats table with demo boats.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

Creates one table per entity (users, boats, bookings, reservations,
payments, reviews, notifications) named <prefix>-<entity>, with the
Global Secondary Indexes the server queries. The reservations table
gets a TTL on its `ttl` attribute so expired holds are purged.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Table name prefix.
    #[arg(long, default_value = "boatrent")]
    pub prefix: String,
}

/// Seed the boats table with demo boats.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo boats into DynamoDB.

Every boat type and a handful of Venezuelan locations are cycled through
so searches and filters have data to match. The boats belong to an
existing owner account, which must be registered first.")]
pub struct SeedCommand {
    /// ID of the owner the boats belong to.
    #[arg(long, value_name = "UUID")]
    pub owner_id: uuid::Uuid,

    /// Number of boats to generate.
    #[arg(long, default_value = "10")]
    pub count: u32,

    /// Table name prefix.
    #[arg(long, default_value = "boatrent")]
    pub prefix: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) if deploy_cmd.destroy => {
            run_destroy(deploy_cmd, &global).await
        }
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    let mut plans = Vec::new();
    for table_config in config::boatrent_table_configs(&cmd.prefix) {
        let current = client::get_table_state(&dynamo_client, &table_config.table_name).await?;
        plans.push(planning::calculate_deploy_plan(current.as_ref(), &table_config));
    }

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in plans.iter().flat_map(planning::format_deploy_plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    if !plans.iter().any(planning::DeployPlan::has_changes) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?", true)?;
    }

    for plan in plans.iter().filter(|p| p.has_changes()) {
        if global.is_verbose() {
            aprintln!("{}", p_b(&planning::format_deploy_plan(plan)[0]));
        }
        deploy::execute_deploy_plan(&dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_destroy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    let mut plans = Vec::new();
    for table_config in config::boatrent_table_configs(&cmd.prefix) {
        let current = client::get_table_state(&dynamo_client, &table_config.table_name).await?;
        plans.push(planning::calculate_destroy_plan(
            current.as_ref(),
            &table_config.table_name,
        ));
    }

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in plans.iter().flat_map(planning::format_destroy_plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if !plans.iter().any(planning::DestroyPlan::has_changes) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm(
            "Are you sure you want to delete these tables? ALL DATA WILL BE LOST",
            false,
        )?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Deleting tables..."));
    }

    for plan in &plans {
        deploy::execute_destroy_plan(&dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Tables destroyed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let table_name = config::boats_table(&cmd.prefix);
    let users_table = config::users_table(&cmd.prefix);

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), table_name);
        aprintln!("{} {}", p_b("Owner:"), cmd.owner_id);
        aprintln!("{} {}", p_b("Boat count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    if client::get_table_state(&dynamo_client, &table_name)
        .await?
        .is_none()
    {
        return Err(DynamodbError::TableNotFound { table_name });
    }

    match client::get_user_role(&dynamo_client, &users_table, cmd.owner_id).await? {
        None => {
            return Err(DynamodbError::OwnerNotFound {
                owner_id: cmd.owner_id,
                table_name: users_table,
            });
        }
        Some(role) if !seed::may_own_boats(&role) => {
            return Err(DynamodbError::NotAnOwner {
                owner_id: cmd.owner_id,
                role,
            });
        }
        Some(_) => {}
    }

    let boats = generate_seed_boats(cmd.owner_id, cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Boats to create:"));
        for boat in boats.iter().take(5) {
            aprintln!(
                "  {} - {} ({}, {}/day)",
                boat.name,
                boat_type_label(boat.boat_type),
                boat.location,
                format_cents(boat.price_per_day_cents)
            );
        }
        if boats.len() > 5 {
            aprintln!("  ... and {} more", boats.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} boats?", boats.len()), true)?;
    }

    let inserted = seed::seed_boats(&dynamo_client, &table_name, &boats).await?;

    if !global.is_silent() {
        aprintln!("{} {} boats inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
