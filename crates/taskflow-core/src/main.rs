//! `taskflow` command-line client

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::PathBuf;
use taskflow_core::{telemetry, AppContext, TaskflowConfig};
use taskflow_model::{EntityId, Record};
use taskflow_view::DerivedView;

fn filter_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("VALUE").help(help)
}

fn query_arg() -> Arg {
    Arg::new("query")
        .long("query")
        .short('q')
        .value_name("TEXT")
        .help("Case-insensitive search text")
}

fn cli() -> Command {
    Command::new("taskflow")
        .version(taskflow_core::VERSION)
        .about("TaskFlow project and task browser")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL, overriding config and environment"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .subcommand(
            Command::new("projects")
                .about("List projects")
                .arg(query_arg())
                .arg(filter_arg("status", "active, in_progress, on_hold, done or all"))
                .arg(filter_arg("category", "Category id or name")),
        )
        .subcommand(
            Command::new("tasks")
                .about("List the tasks of a project")
                .arg(
                    Arg::new("project")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Project id"),
                )
                .arg(query_arg())
                .arg(filter_arg("status", "todo, in-progress, completed or all"))
                .arg(filter_arg("priority", "low, medium, high or all"))
                .arg(filter_arg("type", "Task type or all"))
                .arg(filter_arg("assignee", "Assignee user id or all")),
        )
        .subcommand(
            Command::new("users")
                .about("List users")
                .arg(query_arg())
                .arg(filter_arg("role", "administrator, manager, member or all")),
        )
        .subcommand(Command::new("session").about("Show the signed-in user"))
}

/// Apply `--query` and every categorical flag present in `args`
fn apply_filters<R: Record>(
    view: &DerivedView<R>,
    args: &ArgMatches,
    fields: &[&str],
) -> anyhow::Result<()> {
    if let Some(query) = args.get_one::<String>("query") {
        view.set_query(query);
    }
    for field in fields {
        if let Some(value) = args.get_one::<String>(field) {
            view.set_categorical_filter(field, value)
                .with_context(|| format!("--{field}"))?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    let mut config = TaskflowConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("loading configuration")?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        config = config.with_api_url(url);
    }
    telemetry::init(&config.log)?;

    let json = matches.get_flag("json");
    let context = AppContext::new(config)?;

    match matches.subcommand() {
        Some(("projects", args)) => {
            let board = context.project_board();
            apply_filters(board.view(), args, &["status", "category"])?;
            board.refresh().await.context("fetching projects")?;
            let view = board.view().view();
            if json {
                return print_json(&view.to_vec());
            }
            for project in &view {
                println!(
                    "{:>4}  {:<12} {:<14} {}",
                    project.id,
                    project.status.label(),
                    project.category_name().unwrap_or("-"),
                    project.name
                );
            }
        }
        Some(("tasks", args)) => {
            let project = args
                .get_one::<u64>("project")
                .copied()
                .map(EntityId)
                .context("project id is required")?;
            let board = context.task_board(project);
            apply_filters(board.view(), args, &["status", "priority", "type", "assignee"])?;
            board.refresh().await.context("fetching tasks")?;
            if json {
                return print_json(&board.view().view().to_vec());
            }
            for (status, tasks) in board.columns() {
                println!("{} ({})", status.label(), tasks.len());
                for task in tasks {
                    println!("  {:>4}  {:<6} {}", task.id, task.priority.label(), task.title);
                }
            }
        }
        Some(("users", args)) => {
            let directory = context.user_directory()?;
            apply_filters(directory.view(), args, &["role"])?;
            directory.refresh().await.context("fetching users")?;
            let view = directory.view().view();
            if json {
                return print_json(&view.to_vec());
            }
            for user in &view {
                println!(
                    "{:>4}  {:<14} {:<28} {}",
                    user.id,
                    user.primary_role().label(),
                    user.email,
                    user.full_name
                );
            }
        }
        Some(("session", _)) => match context.session().refresh().await? {
            Some(user) if json => print_json(&user)?,
            Some(user) => println!("{} <{}> {}", user.full_name, user.email, user.primary_role()),
            None => println!("not logged in"),
        },
        Some((other, _)) => anyhow::bail!("unknown command {other}"),
        None => anyhow::bail!("no command given"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(cli().get_matches()).await
}
