//! Command-line dashboard over `taskmaster_core`.
//!
//! # Responsibility
//! - Map subcommands onto dashboard events and print the derived views.
//! - Own process-level setup: logging, database path, clock override.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskmaster_core::db::open_db;
use taskmaster_core::model::project::{DEFAULT_PROJECT_COLOR, PROJECT_COLORS};
use taskmaster_core::{
    default_log_level, format_iso_date, init_logging, local_today, parse_iso_date, DashboardEvent,
    DashboardState, DashboardView, NewProject, NewTask, Priority, SettingChange, SettingKey,
    SqliteDashboardService, Task, TaskCounts, TaskId,
};
use uuid::Uuid;

const SHORT_ID_LEN: usize = 8;

#[derive(Parser)]
#[command(name = "taskmaster", version, about = "Task dashboard backed by a local SQLite file")]
struct Args {
    /// Path to the task database (created and seeded when missing)
    #[arg(long, env = "TASKMASTER_DB", default_value = "taskmaster.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "TASKMASTER_LOG_DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error (defaults per build mode)
    #[arg(long, env = "TASKMASTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Override today's date (YYYY-MM-DD) for the today/upcoming views
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the tasks visible in a view
    List {
        /// inbox, today, upcoming or a project name
        #[arg(long, default_value = "inbox")]
        view: String,
        /// Case-insensitive title filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show outstanding task counts per view and project
    Counts,
    /// Add a task
    Add {
        title: String,
        #[arg(long, default_value = "none", value_parser = parse_priority_arg)]
        priority: Priority,
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
        /// Project name (defaults to the form's pre-selected project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Flip a task between open and completed
    Toggle {
        /// Full task id or a unique prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Full task id or a unique prefix
        id: String,
    },
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Inspect or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex color; see `project colors` for the palette
        #[arg(long, default_value = DEFAULT_PROJECT_COLOR)]
        color: String,
    },
    List,
    /// Print the color palette offered for new projects
    Colors,
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    /// Set one option, e.g. `darkMode true` or `fontSize 16`
    Set { key: String, value: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let today = args.today.unwrap_or_else(local_today);
    let conn = open_db(&args.db)
        .with_context(|| format!("failed to open task database `{}`", args.db.display()))?;
    let service = SqliteDashboardService::open(&conn).context("database is not a task store")?;
    service
        .seed_projects_if_empty()
        .context("failed to seed projects")?;
    let state = service.load().context("failed to load dashboard")?;

    run(&service, state, args.command, today)
}

fn run(
    service: &SqliteDashboardService<'_>,
    state: DashboardState,
    command: Command,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match command {
        Command::List { view, search } => {
            let state = service.dispatch(&state, DashboardEvent::SelectView(view))?.state;
            let state = service.dispatch(&state, DashboardEvent::SetSearch(search))?.state;
            print_view(&state.snapshot(today));
        }
        Command::Counts => print_counts(&state.counts(today)),
        Command::Add {
            title,
            priority,
            due,
            project,
        } => {
            let project = project.unwrap_or_else(|| state.form_project());
            let new_task = NewTask::new(title, project)
                .with_priority(priority)
                .with_due_date(due);
            let transition = service
                .dispatch(&state, DashboardEvent::AddTask(new_task))
                .context("failed to add task")?;
            if let Some(task) = transition.state.tasks.last() {
                println!("added {}", format_task(task));
            }
        }
        Command::Toggle { id } => {
            let id = resolve_task_id(&state, &id)?;
            let transition = service
                .dispatch(&state, DashboardEvent::ToggleTask(id))
                .context("failed to toggle task")?;
            if let Some(task) = transition.state.tasks.iter().find(|task| task.id == id) {
                println!("{}", format_task(task));
            }
        }
        Command::Delete { id } => {
            let id = resolve_task_id(&state, &id)?;
            service
                .dispatch(&state, DashboardEvent::DeleteTask(id))
                .context("failed to delete task")?;
            println!("deleted {}", short_id(id));
        }
        Command::Project { command } => run_project(service, state, command, today)?,
        Command::Settings { command } => run_settings(service, state, command)?,
    }
    Ok(())
}

fn run_project(
    service: &SqliteDashboardService<'_>,
    state: DashboardState,
    command: ProjectCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Add {
            name,
            description,
            color,
        } => {
            let mut new_project = NewProject::new(name).with_color(color);
            if let Some(description) = description {
                new_project = new_project.with_description(description);
            }
            let transition = service
                .dispatch(&state, DashboardEvent::CreateProject(new_project))
                .context("failed to create project")?;
            if let Some(project) = transition.state.projects.last() {
                println!("created project {} ({})", project.name, project.color);
            }
        }
        ProjectCommand::List => {
            let counts = state.counts(today);
            for project in &state.projects {
                let open = counts.project_count(&project.name).unwrap_or(0);
                match project.description.as_deref() {
                    Some(description) => println!(
                        "{:<16} {} {:>3} open  {}",
                        project.name, project.color, open, description
                    ),
                    None => println!("{:<16} {} {:>3} open", project.name, project.color, open),
                }
            }
        }
        ProjectCommand::Colors => {
            for (index, color) in PROJECT_COLORS.iter().enumerate() {
                if index == 0 {
                    println!("{color} (default)");
                } else {
                    println!("{color}");
                }
            }
        }
    }
    Ok(())
}

fn run_settings(
    service: &SqliteDashboardService<'_>,
    state: DashboardState,
    command: SettingsCommand,
) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            for key in SettingKey::ALL {
                println!("{:<20} {}", key.as_str(), state.settings.value(key));
            }
        }
        SettingsCommand::Set { key, value } => {
            let change = SettingChange::parse(&key, &value)?;
            let transition = service
                .dispatch(&state, DashboardEvent::ChangeSetting(change))
                .context("failed to save settings")?;
            let key = SettingKey::parse(&key).context("setting key vanished after parse")?;
            println!("{} = {}", key.as_str(), transition.state.settings.value(key));
        }
    }
    Ok(())
}

fn print_view(view: &DashboardView<'_>) {
    println!("{}", view.title);
    if let Some(message) = view.empty_message {
        println!("  {message}");
        return;
    }
    for task in &view.visible_tasks {
        println!("  {}", format_task(task));
    }
}

fn print_counts(counts: &TaskCounts) {
    for (name, count) in counts.entries() {
        println!("{name:<16} {count}");
    }
}

fn format_task(task: &Task) -> String {
    let mut details = vec![task.project.clone()];
    if task.priority != Priority::None {
        details.push(task.priority.as_str().to_string());
    }
    if let Some(due) = task.due_date {
        details.push(format!("due {}", format_iso_date(due)));
    }
    format!(
        "[{}] {}  {}  ({})",
        if task.completed { "x" } else { " " },
        short_id(task.id),
        task.title,
        details.join(", ")
    )
}

fn short_id(id: TaskId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

/// Accepts a full UUID or a prefix matching exactly one task.
fn resolve_task_id(state: &DashboardState, input: &str) -> anyhow::Result<TaskId> {
    let input = input.trim().to_ascii_lowercase();
    if let Ok(id) = Uuid::parse_str(&input) {
        return Ok(id);
    }
    if input.is_empty() {
        bail!("task id cannot be empty");
    }

    let mut matches = state
        .tasks
        .iter()
        .filter(|task| task.id.to_string().starts_with(&input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (None, _) => bail!("no task matches id `{input}`"),
        (Some(_), Some(_)) => bail!("task id `{input}` is ambiguous; use more characters"),
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|err| err.to_string())
}

fn parse_priority_arg(value: &str) -> Result<Priority, String> {
    Priority::parse(value)
        .ok_or_else(|| format!("invalid priority `{value}`; expected none|low|medium|high"))
}
