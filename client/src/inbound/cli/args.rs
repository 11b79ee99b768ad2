//! Command-line surface of `studio-admin`.
//!
//! Each subcommand stands in for one screen of the studio front end and is
//! checked against the route guard before it runs.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{CatalogueKind, ProjectId, ProjectListKind, ProjectStatus, Role, Route};

/// `studio-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "studio-admin",
    about = "Manage studio projects, inventory, and users from the terminal",
    version
)]
pub struct Cli {
    /// Screen to open.
    #[command(subcommand)]
    pub command: Command,
}

/// One top-level action.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in and remember the token.
    Login {
        /// Account e-mail.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Forget the token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show the navigation menu for the current session.
    Nav,
    /// Projects and their lists.
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Inventory catalogue.
    #[command(subcommand)]
    Inventory(CatalogueCommand),
    /// Equipment and decor catalogue.
    #[command(subcommand)]
    Equipment(CatalogueCommand),
    /// User accounts (administrators only).
    #[command(subcommand)]
    Users(UsersCommand),
    /// Activity log (administrators only).
    #[command(subcommand)]
    Logs(LogsCommand),
    /// Create the first administrator on an empty backend.
    Init,
    /// Seed demonstration data (administrators only).
    LoadTestData,
}

impl Command {
    /// Route the guard checks before running; `None` skips the guard.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Login { .. } => Some(Route::Login),
            Self::Logout => None,
            Self::Whoami | Self::Nav => Some(Route::DEFAULT),
            Self::Projects(command) => Some(command.route()),
            Self::Inventory(_) => Some(Route::Inventory),
            Self::Equipment(_) => Some(Route::Equipment),
            Self::Users(_) => Some(Route::Users),
            Self::Logs(_) => Some(Route::Logs),
            Self::Init => Some(Route::Bootstrap),
            Self::LoadTestData => Some(Route::TestData),
        }
    }
}

/// `projects` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProjectsCommand {
    /// List every project.
    List,
    /// Show one project with its lists.
    Show {
        /// Project identifier.
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,
    },
    /// Create a project.
    Create {
        /// Event title.
        #[arg(long)]
        title: String,
        /// Lead decorator's name.
        #[arg(long = "lead-decorator")]
        lead_decorator: String,
        /// Event date as `YYYY-MM-DD` or RFC 3339.
        #[arg(long, value_parser = parse_project_date)]
        date: DateTime<Utc>,
    },
    /// Change a project's workflow status.
    Status {
        /// Project identifier.
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,
        /// New status label, e.g. `Согласован`.
        #[arg(value_parser = parse_status)]
        status: ProjectStatus,
    },
    /// Delete a project.
    Delete {
        /// Project identifier.
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,
    },
    /// Append one item to one of the project's lists.
    AddItem(AddItemArgs),
}

impl ProjectsCommand {
    fn route(&self) -> Route {
        match self {
            Self::Show { id } | Self::Status { id, .. } | Self::Delete { id } => {
                Route::ProjectDetail(id.clone())
            }
            Self::AddItem(args) => Route::ProjectDetail(args.id.clone()),
            Self::List | Self::Create { .. } => Route::Projects,
        }
    }
}

/// Arguments of `projects add-item`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AddItemArgs {
    /// Project identifier.
    #[arg(value_parser = parse_project_id)]
    pub id: ProjectId,
    /// Target list.
    #[arg(long, value_enum)]
    pub list: ListArg,
    /// Where the item comes from.
    #[arg(long, value_enum, default_value_t = SourceArg::Manual)]
    pub source: SourceArg,
    /// Catalogue item id when picking from inventory or equipment.
    #[arg(long)]
    pub item: Option<String>,
    /// Item name for manual entries.
    #[arg(long)]
    pub name: Option<String>,
    /// Category for manual entries.
    #[arg(long)]
    pub category: Option<String>,
    /// Quantity; defaults to one.
    #[arg(long)]
    pub quantity: Option<u32>,
    /// Notes for manual entries.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Project list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    /// Draft list.
    Preliminary,
    /// Agreed list.
    Final,
    /// Dismantling list.
    Dismantling,
}

impl From<ListArg> for ProjectListKind {
    fn from(value: ListArg) -> Self {
        match value {
            ListArg::Preliminary => Self::Preliminary,
            ListArg::Final => Self::Final,
            ListArg::Dismantling => Self::Dismantling,
        }
    }
}

/// Item origin selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Pick from the inventory catalogue.
    Inventory,
    /// Pick from the equipment catalogue.
    Equipment,
    /// Type the item by hand.
    Manual,
}

impl SourceArg {
    /// Catalogue to pick from; `None` for manual entries.
    pub const fn catalogue(self) -> Option<CatalogueKind> {
        match self {
            Self::Inventory => Some(CatalogueKind::Inventory),
            Self::Equipment => Some(CatalogueKind::Equipment),
            Self::Manual => None,
        }
    }
}

/// `inventory` and `equipment` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CatalogueCommand {
    /// List items, optionally filtered by a search term.
    List {
        /// Case-insensitive match on name, category, or description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one item.
    Show {
        /// Item identifier.
        id: String,
    },
    /// Create an item.
    Create(CatalogueFields),
    /// Update fields of an item.
    Update {
        /// Item identifier.
        id: String,
        /// Fields to change; omitted ones stay as they are.
        #[command(flatten)]
        fields: CatalogueFieldChanges,
    },
    /// Delete an item.
    Delete {
        /// Item identifier.
        id: String,
    },
    /// Attach an image file to an item.
    UploadImage {
        /// Item identifier.
        id: String,
        /// Image file to upload.
        file: PathBuf,
    },
    /// Remove an image from an item.
    DeleteImage {
        /// Item identifier.
        id: String,
        /// Image URL as listed by `show`.
        url: String,
    },
}

/// Required fields for a new catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct CatalogueFields {
    /// Grouping used by the pickers.
    #[arg(long)]
    pub category: String,
    /// Item name.
    #[arg(long)]
    pub name: String,
    /// Stock on hand.
    #[arg(long = "quantity")]
    pub total_quantity: i64,
    /// Short marker printed next to the name.
    #[arg(long = "marker")]
    pub visual_marker: Option<String>,
    /// Free-form description.
    #[arg(long)]
    pub description: Option<String>,
}

/// Optional field changes for an existing catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct CatalogueFieldChanges {
    /// New category.
    #[arg(long)]
    pub category: Option<String>,
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// New stock level.
    #[arg(long = "quantity")]
    pub total_quantity: Option<i64>,
    /// New marker.
    #[arg(long = "marker")]
    pub visual_marker: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
}

/// `users` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum UsersCommand {
    /// List accounts.
    List,
    /// Create an account.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Login e-mail.
        #[arg(long)]
        email: String,
        /// Initial password.
        #[arg(long)]
        password: String,
        /// Role label, e.g. `Флорист`.
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Delete an account.
    Delete {
        /// Account identifier.
        id: String,
    },
}

/// `logs` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum LogsCommand {
    /// Show recent entries.
    List {
        /// Maximum number of entries.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Remove old entries.
    Cleanup,
}

fn parse_project_id(raw: &str) -> Result<ProjectId, String> {
    ProjectId::new(raw).ok_or_else(|| "project id must not be empty".to_owned())
}

fn parse_project_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("'{raw}' is not a YYYY-MM-DD or RFC 3339 date"))
}

fn parse_status(raw: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::from_label(raw).ok_or_else(|| {
        let labels: Vec<&str> = ProjectStatus::ALL.iter().map(|status| status.label()).collect();
        format!("unknown status '{raw}'; expected one of: {}", labels.join(", "))
    })
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::from_wire(raw).ok_or_else(|| {
        let labels: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
        format!("unknown role '{raw}'; expected one of: {}", labels.join(", "))
    })
}

#[cfg(test)]
mod tests {
    //! Parsing coverage for the command surface.
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("studio-admin").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("arguments parse").command
    }

    #[rstest]
    fn add_item_defaults_to_manual_entry() {
        let command = parse(&["projects", "add-item", "p-1", "--list", "final", "--name", "Vase"]);
        let Command::Projects(ProjectsCommand::AddItem(args)) = command else {
            panic!("expected add-item");
        };
        assert_eq!(args.source, SourceArg::Manual);
        assert_eq!(ProjectListKind::from(args.list), ProjectListKind::Final);
        assert_eq!(args.name.as_deref(), Some("Vase"));
        assert!(args.quantity.is_none());
    }

    #[rstest]
    #[case(&["login", "--email", "a@b.c", "--password", "pw"], Some(Route::Login))]
    #[case(&["logout"], None)]
    #[case(&["inventory", "list"], Some(Route::Inventory))]
    #[case(&["users", "list"], Some(Route::Users))]
    #[case(&["logs", "cleanup"], Some(Route::Logs))]
    #[case(&["init"], Some(Route::Bootstrap))]
    #[case(&["load-test-data"], Some(Route::TestData))]
    fn commands_map_to_routes(#[case] args: &[&str], #[case] expected: Option<Route>) {
        assert_eq!(parse(args).route(), expected);
    }

    #[rstest]
    fn project_commands_target_the_detail_route() {
        let command = parse(&["projects", "show", "p-9"]);
        let id = ProjectId::new("p-9").expect("id");
        assert_eq!(command.route(), Some(Route::ProjectDetail(id)));
    }

    #[rstest]
    #[case("2025-06-01", "2025-06-01T00:00:00+00:00")]
    #[case("2025-06-01T18:30:00+03:00", "2025-06-01T15:30:00+00:00")]
    fn project_dates_accept_both_forms(#[case] raw: &str, #[case] expected: &str) {
        let parsed = parse_project_date(raw).expect("date parses");
        assert_eq!(parsed.to_rfc3339(), expected);
    }

    #[rstest]
    fn unknown_status_lists_the_vocabulary() {
        let err = parse_status("Done").expect_err("unknown status");
        assert!(err.contains("Создан"));
    }

    #[rstest]
    fn roles_parse_from_their_labels() {
        assert_eq!(parse_role("Флорист"), Ok(Role::Florist));
        assert!(parse_role("Gardener").is_err());
    }
}
