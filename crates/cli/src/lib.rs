// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `gt`: the operator-facing CLI over the convoy manager and work queue
//! dispatcher.

pub mod client;
pub mod color;
pub mod commands;
pub mod context;
pub mod exit_error;
pub mod output;

use clap::{CommandFactory, FromArgMatches, Parser};
use commands::convoy::ConvoyArgs;
use commands::queue::QueueArgs;
use commands::sling::SlingArgs;
use context::Context;
use exit_error::CliError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "gt", version, about = "Operate gastown convoys and the work queue")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for commands that print structured data
    #[arg(long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Enroll one or more issues into a new convoy
    Sling(SlingArgs),
    /// Operate a specific convoy
    Convoy(ConvoyArgs),
    /// Operate the work queue
    Queue(QueueArgs),
}

/// Parse `argv`, dispatch to the matching handler, and return the exit code
/// `main` should use.
pub async fn run(argv: impl Iterator<Item = String>) -> i32 {
    let command = Cli::command().styles(color::styles());
    let cli = match command.try_get_matches_from(argv).and_then(|m| Cli::from_arg_matches(&m)) {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return e.exit_code();
        }
    };

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", color::header("error:"));
            eprintln!("{}", e.message);
            e.code
        }
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::load()?;

    match cli.command {
        Command::Sling(args) => commands::sling::handle(&ctx.store, &ctx.routing, &ctx.clock, args.issues, args.rig).await,

        Command::Convoy(args) => match args.command {
            commands::convoy::ConvoyCommand::Create { title, issues, rig } => {
                commands::convoy::create(&ctx.store, &ctx.routing, &ctx.clock, title, issues, rig).await
            }
            commands::convoy::ConvoyCommand::Add { convoy, issue } => commands::convoy::add(&ctx.store, convoy, issue).await,
            commands::convoy::ConvoyCommand::Check { convoy } => commands::convoy::check(&ctx.store, &ctx.sessions, &ctx.clock, convoy).await,
            commands::convoy::ConvoyCommand::Status { convoy } => commands::convoy::status(&ctx.store, cli.format, convoy).await,
            commands::convoy::ConvoyCommand::List { all } => commands::convoy::list(&ctx.store, cli.format, all).await,
            commands::convoy::ConvoyCommand::Stranded => commands::convoy::stranded(&ctx.store, cli.format).await,
            commands::convoy::ConvoyCommand::Close { convoy, reason } => commands::convoy::close(&ctx.store, &ctx.clock, convoy, reason).await,
            commands::convoy::ConvoyCommand::Land { convoy } => commands::convoy::land(&ctx.store, &ctx.clock, convoy).await,
        },

        Command::Queue(args) => match args.command {
            commands::queue::QueueCommand::Status => {
                let client = client::DaemonClient::new(ctx.socket_path());
                commands::queue::status(&client, cli.format).await
            }
            commands::queue::QueueCommand::Pause { by } => {
                let client = client::DaemonClient::new(ctx.socket_path());
                commands::queue::pause(&client, by).await
            }
            commands::queue::QueueCommand::Resume => {
                let client = client::DaemonClient::new(ctx.socket_path());
                commands::queue::resume(&client).await
            }
            commands::queue::QueueCommand::List { bead } => commands::queue::list(&ctx.store, cli.format, bead).await,
            commands::queue::QueueCommand::Clear { bead } => commands::queue::clear(&ctx.store, bead).await,
            commands::queue::QueueCommand::Run { batch, max_polecats, dry_run } => {
                commands::queue::run(&ctx.store, &ctx.sessions, &ctx.clock, ctx.config.document.queue.clone(), batch, max_polecats, dry_run).await
            }
        },
    }
}
