//! Domain primitives, the session state machine, and the ports they drive.
//!
//! Purpose: keep every rule the front end relies on (roles, route access,
//! error taxonomy, list-append semantics) independent of HTTP and storage so
//! adapters can be swapped in tests.
//!
//! Public surface:
//! - Error / ErrorCode: normalised failure with optional HTTP status.
//! - SessionStore / SessionState: token and user lifecycle.
//! - ApiClient / AuthSignal: token injection and 401 signalling.
//! - Route / decide: navigation guard.
//! - ProjectListService: append-only project list edits.

pub mod acknowledgement;
pub mod activity_log;
pub mod api_client;
pub mod auth;
pub mod catalogue;
pub mod error;
pub mod guard;
pub mod ports;
pub mod project;
pub mod project_lists;
pub mod role;
pub mod session;
pub mod timestamp;
pub mod user;

pub use self::acknowledgement::Acknowledgement;
pub use self::activity_log::{CleanupReport, DEFAULT_LOG_LIMIT, LogEntry, log_limit};
pub use self::api_client::{ApiClient, AuthSignal, AuthSignals};
pub use self::auth::{
    AccessToken, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError,
};
pub use self::catalogue::{
    CatalogueItem, CatalogueItemUpdate, CatalogueKind, ImageUpload, ImageUploadError,
    MAX_IMAGE_BYTES, NewCatalogueItem,
};
pub use self::error::{Error, ErrorCode};
pub use self::guard::{AccessLevel, GuardDecision, NavItem, Route, decide, navigation_menu};
pub use self::project::{
    ItemSource, NewProject, Project, ProjectId, ProjectList, ProjectListItem, ProjectListKind,
    ProjectRevision, ProjectStatus, ProjectUpdate,
};
pub use self::project_lists::{
    DEFAULT_ITEM_QUANTITY, ListItemError, ProjectListService, item_from_catalogue, manual_item,
    required_capability,
};
pub use self::role::{AssignedRole, Capability, Role};
pub use self::session::{LoginOutcome, SessionState, SessionStore};
pub use self::user::{User, UserId, UserValidationError};

/// Convenient result alias for facade calls.
///
/// # Examples
/// ```
/// use client::domain::{ApiResult, Error};
///
/// fn fetch() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(fetch().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
