use clap::{Parser, Subcommand};
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use crate::api::{ApiClient, ReviewFilter, SubmissionFilter};
use crate::config::Config;
use crate::db::DbConnection;
use crate::models::{Id, Snapshot, UserRole};
use crate::overview::students;
use crate::store::{fetch_snapshot, EntityStore, FallbackStore, LocalStore, RemoteStore, StoreError};
use crate::views::{AdminState, Mutation, ProjectCard, SubmissionRow};
use crate::cli::commands_reviews::{handle_reviews_list, handle_reviews_overview};
use crate::cli::error::{user_error, validate_id, validate_non_empty};
use crate::cli::output::{format_project_cards, format_submission_rows, format_user_table, get_terminal_width, is_tty};
use crate::utils::parse_due_date;

#[derive(Parser)]
#[command(name = "citriq")]
#[command(about = "CITRIQ - peer review dashboards for class projects")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Use the local store only, never contact the review service
    #[arg(long, global = true)]
    pub offline: bool,
    /// Review service base URL (overrides api.url and CITRIQ_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project management commands
    Projects {
        #[command(subcommand)]
        subcommand: ProjectCommands,
    },
    /// User commands
    Users {
        #[command(subcommand)]
        subcommand: UserCommands,
    },
    /// Review commands
    Reviews {
        #[command(subcommand)]
        subcommand: ReviewCommands,
    },
    /// Show service analytics
    Stats,
    /// Replace the local store with a JSON snapshot
    Import {
        /// Snapshot file with users, projects, reviews and submissions
        file: PathBuf,
    },
    /// Copy everything from the review service into the local store
    Sync,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Create a new project
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Due date (YYYY-MM-DD, today, tomorrow, +Nd, +Nw)
        #[arg(long = "due")]
        due: String,
        /// Assign a student by id; repeating an id unassigns it again
        #[arg(long = "student", value_name = "ID")]
        students: Vec<String>,
    },
    /// Delete a project
    Delete {
        /// Project ID
        id: String,
        /// Delete without confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show submissions of a project
    Submissions {
        /// Project ID
        id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        /// Only users with this role (student, teacher, admin)
        #[arg(long)]
        role: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Show a user's reviews grouped by project
    Overview {
        /// User ID
        #[arg(long)]
        user: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// List reviews
    List {
        #[arg(long)]
        project: Option<String>,
        /// Reviews where the user is reviewer or reviewee
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        reviewer: Option<String>,
        #[arg(long)]
        reviewee: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    let ctx = CliContext { config, offline: cli.offline };

    match cli.command {
        Commands::Projects { subcommand } => handle_projects(&ctx, subcommand),
        Commands::Users { subcommand } => match subcommand {
            UserCommands::List { role, json } => handle_users_list(&ctx, role, json),
        },
        Commands::Reviews { subcommand } => match subcommand {
            ReviewCommands::Overview { user, json } => {
                let user_id = parse_id(&user, "User");
                handle_reviews_overview(&ctx, user_id, json)
            }
            ReviewCommands::List { project, user, reviewer, reviewee, json } => {
                let filter = ReviewFilter {
                    project_id: project.map(|id| parse_id(&id, "Project")),
                    user_id: user.map(|id| parse_id(&id, "User")),
                    reviewer_id: reviewer.map(|id| parse_id(&id, "User")),
                    reviewee_id: reviewee.map(|id| parse_id(&id, "User")),
                };
                handle_reviews_list(&ctx, &filter, json)
            }
        },
        Commands::Stats => handle_stats(&ctx),
        Commands::Import { file } => handle_import(&ctx, &file),
        Commands::Sync => handle_sync(&ctx),
    }
}

/// Resolved configuration plus global flags, shared by all handlers
pub struct CliContext {
    pub config: Config,
    pub offline: bool,
}

impl CliContext {
    pub fn local_store(&self) -> Result<LocalStore> {
        let conn = DbConnection::connect(&self.config.data_location)
            .context("Failed to connect to database")?;
        Ok(LocalStore::new(conn))
    }

    pub fn remote_store(&self) -> Result<RemoteStore> {
        let client = ApiClient::new(&self.config.api).context("Failed to build HTTP client")?;
        Ok(RemoteStore::new(client))
    }

    /// The service with the local store behind it, or the local store alone when offline
    pub fn store(&self) -> Result<Box<dyn EntityStore>> {
        let local = self.local_store()?;
        if self.offline {
            log::debug!("offline, using local store");
            return Ok(Box::new(local));
        }
        Ok(Box::new(FallbackStore::new(self.remote_store()?, local)))
    }
}

pub(crate) fn parse_id(id_str: &str, entity: &str) -> Id {
    validate_id(id_str, entity).unwrap_or_else(|e| user_error(&e))
}

/// Turn a missing entity into a user error; everything else propagates
pub(crate) fn or_user_error<T>(result: Result<T, StoreError>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(StoreError::NotFound { entity, id }) => user_error(&format!("{} {} not found", entity, id)),
        Err(e) => Err(e.into()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/n): ", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)
        .context("Failed to read input")?;
    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

fn handle_projects(ctx: &CliContext, cmd: ProjectCommands) -> Result<()> {
    let store = ctx.store()?;
    let mut state = AdminState::new();

    match cmd {
        ProjectCommands::List { json } => {
            let projects = store.list_projects()?;
            let users = store.list_users()?;
            let cards: Vec<ProjectCard> = projects
                .iter()
                .map(|project| ProjectCard::build(project, &users))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                let today = Local::now().date_naive();
                print!("{}", format_project_cards(&cards, today, get_terminal_width(), is_tty()));
            }
            Ok(())
        }
        ProjectCommands::Add { title, description, due, students: student_args } => {
            if let Err(e) = validate_non_empty(&title, "Title") {
                user_error(&e);
            }
            if let Err(e) = validate_non_empty(&description, "Description") {
                user_error(&e);
            }

            state.open_form();
            state.draft.title = title;
            state.draft.description = description;
            state.draft.due_date = Some(parse_due_date(&due).unwrap_or_else(|e| user_error(&e.to_string())));

            if !student_args.is_empty() {
                let users = store.list_users()?;
                let known = students(&users);
                for arg in &student_args {
                    let id = parse_id(arg, "Student");
                    if !known.iter().any(|user| user.id == id) {
                        user_error(&format!("User {} is not a student", id));
                    }
                    state.draft.toggle_student(id);
                }
            }

            let new_project = state.draft.submit().unwrap_or_else(|e| user_error(&e.to_string()));
            if !state.begin(Mutation::CreateProject) {
                user_error("Another project change is still in progress");
            }
            let created = store.create_project(&new_project);
            state.finish(created.is_ok());
            let project = created.context("Failed to create project")?;

            println!("Created project '{}' (id: {})", project.title, project.id);
            Ok(())
        }
        ProjectCommands::Delete { id, yes } => {
            let project_id = parse_id(&id, "Project");
            let projects = store.list_projects()?;
            let Some(project) = projects.iter().find(|p| p.id == project_id) else {
                user_error(&format!("Project {} not found", project_id));
            };

            if !yes && !confirm(&format!("Delete project {} ({})?", project.id, project.title))? {
                println!("Cancelled.");
                return Ok(());
            }

            if !state.begin(Mutation::DeleteProject(project_id)) {
                user_error("Another project change is still in progress");
            }
            let deleted = store.delete_project(project_id);
            state.finish(deleted.is_ok());
            or_user_error(deleted)?;

            println!("Deleted project {} ({})", project.id, project.title);
            Ok(())
        }
        ProjectCommands::Submissions { id, json } => {
            let project_id = parse_id(&id, "Project");
            let mut projects = store.list_projects()?;
            let Some(pos) = projects.iter().position(|p| p.id == project_id) else {
                user_error(&format!("Project {} not found", project_id));
            };
            state.view_submissions(project_id);

            let mut project = projects.swap_remove(pos);
            project.submissions = store.list_submissions(&SubmissionFilter::for_project(project_id))?;
            let users = store.list_users()?;
            let rows = SubmissionRow::for_project(&project, &users);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", format_submission_rows(&project.title, &rows, is_tty()));
            }
            state.close_submissions();
            Ok(())
        }
    }
}

fn handle_users_list(ctx: &CliContext, role: Option<String>, json: bool) -> Result<()> {
    let role = role.map(|r| {
        UserRole::from_str(&r.to_lowercase()).unwrap_or_else(|| {
            user_error(&format!("Invalid role: '{}'. Use student, teacher or admin.", r))
        })
    });

    let users = ctx.store()?.list_users()?;
    let users: Vec<_> = users
        .iter()
        .filter(|user| role.map_or(true, |r| user.role == r))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else {
        print!("{}", format_user_table(&users));
    }
    Ok(())
}

fn handle_stats(ctx: &CliContext) -> Result<()> {
    if ctx.offline {
        user_error("Analytics are only available from the review service");
    }
    let client = ApiClient::new(&ctx.config.api).context("Failed to build HTTP client")?;
    let analytics = client.analytics().map_err(StoreError::from)?;
    println!("{}", serde_json::to_string_pretty(&analytics)?);
    Ok(())
}

fn handle_import(ctx: &CliContext, file: &std::path::Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .unwrap_or_else(|e| user_error(&format!("Cannot read {}: {}", file.display(), e)));
    let snapshot: Snapshot = serde_json::from_str(&content)
        .unwrap_or_else(|e| user_error(&format!("Invalid snapshot {}: {}", file.display(), e)));

    let summary = ctx.local_store()?.replace(&snapshot)?;
    println!(
        "Imported {} users, {} projects, {} reviews, {} submissions into {}",
        summary.users,
        summary.projects,
        summary.reviews,
        summary.submissions,
        ctx.config.data_location.display()
    );
    Ok(())
}

fn handle_sync(ctx: &CliContext) -> Result<()> {
    if ctx.offline {
        user_error("Cannot sync while offline");
    }
    let remote = ctx.remote_store()?;
    let snapshot = fetch_snapshot(&remote)?;
    let summary = ctx.local_store()?.replace(&snapshot)?;
    println!(
        "Synced {} users, {} projects, {} reviews, {} submissions from {}",
        summary.users,
        summary.projects,
        summary.reviews,
        summary.submissions,
        remote.client().base_url()
    );
    Ok(())
}
