//! Test utilities for the client crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! These helpers mirror what the token store does so suites can inspect
    //! token files without reaching for `std::fs`.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use client::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("client-cap-fs-read-example.txt");
    /// write_file(&path, b"hello\n")?;
    ///
    /// let content = read_file_to_string(&path)?;
    /// assert_eq!(content, "hello\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};

use crate::domain::ports::{
    ApiRequest, ApiResponse, ApiTransport, HttpMethod, RequestBody, TransportError,
};
use crate::domain::timestamp;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Transport that records requests and replays one canned response.
#[derive(Debug)]
pub struct RecordingTransport {
    response: ApiResponse,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    /// Answer every request with `status` and `body`.
    pub fn answering(status: u16, body: Value) -> Self {
        Self {
            response: ApiResponse::json(status, &body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl ApiTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        lock(&self.requests).push(request);
        Ok(self.response.clone())
    }
}

const FIXTURE_EPOCH: &str = "2025-05-02T08:30:00Z";

#[derive(Debug, Default)]
struct BackendState {
    users: Vec<FakeAccount>,
    tokens: BTreeMap<String, String>,
    projects: BTreeMap<String, Value>,
    requests: Vec<ApiRequest>,
    honour_preconditions: bool,
    issued: u32,
    revision: i64,
}

#[derive(Debug, Clone)]
struct FakeAccount {
    user: Value,
    password: String,
}

/// In-process imitation of the studio backend's auth and project endpoints.
///
/// Tokens are opaque `token-N` strings, partial `PATCH` bodies merge at the
/// top level, and every write bumps `updated_at`. `If-Match` is ignored
/// unless [`FakeBackend::honour_preconditions`] is enabled.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

impl FakeBackend {
    /// Empty backend with no accounts or projects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn add_user(&self, email: &str, password: &str, role: &str) {
        let mut state = lock(&self.state);
        let id = format!("00000000-0000-4000-8000-{:012}", state.users.len() + 1);
        state.users.push(FakeAccount {
            user: json!({
                "id": id,
                "name": email.split('@').next().unwrap_or(email),
                "email": email,
                "role": role,
                "is_active": true,
                "created_at": FIXTURE_EPOCH,
            }),
            password: password.to_owned(),
        });
    }

    /// Issue a token for `email` as if it had logged in earlier.
    pub fn issue_token(&self, email: &str) -> Option<String> {
        let mut state = lock(&self.state);
        let known = state
            .users
            .iter()
            .any(|account| account.user["email"] == email);
        known.then(|| issue(&mut state, email))
    }

    /// Invalidate every issued token.
    pub fn revoke_tokens(&self) {
        lock(&self.state).tokens.clear();
    }

    /// Store a project with empty lists and return its id.
    pub fn add_project(&self, id: &str, title: &str) -> String {
        let mut state = lock(&self.state);
        let project = json!({
            "id": id,
            "title": title,
            "lead_decorator": "Lead",
            "project_date": "2025-06-01T00:00:00Z",
            "status": "Создан",
            "preliminary_list": { "items": [] },
            "final_list": { "items": [] },
            "dismantling_list": { "items": [] },
            "curator_agreement": false,
            "decorator_agreement": false,
            "created_at": FIXTURE_EPOCH,
            "updated_at": FIXTURE_EPOCH,
        });
        state.projects.insert(id.to_owned(), project);
        id.to_owned()
    }

    /// Replace one field of a stored project directly.
    pub fn set_project_field(&self, id: &str, field: &str, value: Value) {
        let mut state = lock(&self.state);
        if let Some(Value::Object(project)) = state.projects.get_mut(id) {
            project.insert(field.to_owned(), value);
        }
    }

    /// Simulate a concurrent writer by bumping the project's revision.
    pub fn touch_project(&self, id: &str) {
        let mut state = lock(&self.state);
        let stamp = next_stamp(&mut state);
        if let Some(Value::Object(project)) = state.projects.get_mut(id) {
            project.insert("updated_at".to_owned(), Value::String(stamp));
        }
    }

    /// Reject stale `If-Match` preconditions with 412.
    pub fn honour_preconditions(&self, enabled: bool) {
        lock(&self.state).honour_preconditions = enabled;
    }

    /// Stored project document.
    pub fn project(&self, id: &str) -> Option<Value> {
        lock(&self.state).projects.get(id).cloned()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.state).requests.clone()
    }

    fn handle(&self, request: ApiRequest) -> ApiResponse {
        let mut state = lock(&self.state);
        state.requests.push(request.clone());

        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .skip(1)
            .collect();
        match (request.method, segments.as_slice()) {
            (HttpMethod::Post, ["auth", "login"]) => login(&mut state, &request),
            (HttpMethod::Get, ["auth", "me"]) => match caller(&state, &request) {
                Some(user) => ApiResponse::json(200, &user),
                None => unauthorised(),
            },
            (_, ["projects", ..]) if caller(&state, &request).is_none() => unauthorised(),
            (HttpMethod::Get, ["projects"]) => {
                let projects: Vec<Value> = state.projects.values().cloned().collect();
                ApiResponse::json(200, &Value::Array(projects))
            }
            (HttpMethod::Get, ["projects", id]) => match state.projects.get(*id) {
                Some(project) => ApiResponse::json(200, project),
                None => not_found("Project not found"),
            },
            (HttpMethod::Patch, ["projects", id]) => patch_project(&mut state, id, &request),
            _ => not_found("Not Found"),
        }
    }
}

#[async_trait]
impl ApiTransport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        Ok(self.handle(request))
    }
}

fn issue(state: &mut BackendState, email: &str) -> String {
    state.issued += 1;
    let token = format!("token-{}", state.issued);
    state.tokens.insert(token.clone(), email.to_owned());
    token
}

fn next_stamp(state: &mut BackendState) -> String {
    state.revision += 1;
    let base = DateTime::parse_from_rfc3339(FIXTURE_EPOCH)
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_default();
    (base + Duration::seconds(state.revision)).to_rfc3339()
}

fn caller(state: &BackendState, request: &ApiRequest) -> Option<Value> {
    let token = request.bearer.as_ref()?;
    let email = state.tokens.get(token.expose())?;
    state
        .users
        .iter()
        .find(|account| account.user["email"] == email.as_str())
        .map(|account| account.user.clone())
}

fn login(state: &mut BackendState, request: &ApiRequest) -> ApiResponse {
    let RequestBody::Json(body) = &request.body else {
        return ApiResponse::json(422, &json!({ "detail": [{ "msg": "field required" }] }));
    };
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let matches = state
        .users
        .iter()
        .any(|account| account.user["email"] == email && account.password == password);
    if !matches {
        return ApiResponse::json(401, &json!({ "detail": "Incorrect email or password" }));
    }
    let token = issue(state, email);
    ApiResponse::json(200, &json!({ "access_token": token, "token_type": "bearer" }))
}

fn patch_project(state: &mut BackendState, id: &str, request: &ApiRequest) -> ApiResponse {
    let Some(current) = state.projects.get(id) else {
        return not_found("Project not found");
    };
    let stale = request
        .if_match
        .as_ref()
        .is_some_and(|tag| *tag != entity_tag(current));
    if state.honour_preconditions && stale {
        return ApiResponse::json(412, &json!({ "detail": "Project was modified" }));
    }
    let RequestBody::Json(Value::Object(changes)) = &request.body else {
        return ApiResponse::json(422, &json!({ "detail": "expected a JSON object" }));
    };

    let changes: Map<String, Value> = changes.clone();
    let stamp = next_stamp(state);
    let Some(Value::Object(project)) = state.projects.get_mut(id) else {
        return not_found("Project not found");
    };
    project.extend(changes);
    project.insert("updated_at".to_owned(), Value::String(stamp));
    ApiResponse::json(200, &Value::Object(project.clone()))
}

fn entity_tag(project: &Value) -> String {
    let stamp = project["updated_at"]
        .as_str()
        .and_then(timestamp::parse)
        .map(|stamp| stamp.to_rfc3339())
        .unwrap_or_default();
    format!("\"{stamp}\"")
}

fn unauthorised() -> ApiResponse {
    ApiResponse::json(401, &json!({ "detail": "Could not validate credentials" }))
}

fn not_found(detail: &str) -> ApiResponse {
    ApiResponse::json(404, &json!({ "detail": detail }))
}
