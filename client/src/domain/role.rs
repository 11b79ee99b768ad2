//! Roles and the permission matrix.
//!
//! The backend issues role names as fixed Russian strings. They decode into a
//! closed [`Role`] enum; anything else is kept verbatim as
//! [`AssignedRole::Unrecognised`] and is granted no capability at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed role vocabulary shared with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// `Администратор`.
    Administrator,
    /// `Куратор студии`.
    StudioCurator,
    /// `Ведущий декоратор`.
    LeadDecorator,
    /// `Флорист`.
    Florist,
}

impl Role {
    /// Every role, in the order the backend documents them.
    pub const ALL: [Self; 4] = [
        Self::Administrator,
        Self::LeadDecorator,
        Self::Florist,
        Self::StudioCurator,
    ];

    /// Wire name issued by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "Администратор",
            Self::StudioCurator => "Куратор студии",
            Self::LeadDecorator => "Ведущий декоратор",
            Self::Florist => "Флорист",
        }
    }

    /// Parse an exact wire name. Comparison is case- and whitespace-sensitive.
    ///
    /// # Examples
    /// ```
    /// use client::domain::Role;
    ///
    /// assert_eq!(Role::from_wire("Флорист"), Some(Role::Florist));
    /// assert_eq!(Role::from_wire("florist"), None);
    /// ```
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw)
    }

    /// Whether this role holds `capability`.
    pub fn allows(self, capability: Capability) -> bool {
        PERMISSION_MATRIX
            .iter()
            .find(|(role, _)| *role == self)
            .is_some_and(|(_, granted)| granted.contains(&capability))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Settings, users, activity log, and seed data screens.
    Administer,
    /// Create and delete user accounts.
    ManageUsers,
    /// Create, edit, and delete inventory/equipment items and their images.
    ManageInventory,
    /// Append items to a project's final list.
    EditFinalList,
    /// Append items to preliminary and dismantling lists.
    EditWorkingLists,
    /// Delete projects.
    DeleteProjects,
}

/// The single source of truth for role permissions.
const PERMISSION_MATRIX: [(Role, &[Capability]); 4] = [
    (
        Role::Administrator,
        &[
            Capability::Administer,
            Capability::ManageUsers,
            Capability::ManageInventory,
            Capability::EditFinalList,
            Capability::EditWorkingLists,
            Capability::DeleteProjects,
        ],
    ),
    (
        Role::StudioCurator,
        &[Capability::ManageInventory, Capability::EditFinalList],
    ),
    (Role::LeadDecorator, &[]),
    (Role::Florist, &[]),
];

/// Role as assigned to a user record.
///
/// Serialises to and from the raw backend string so unknown names survive a
/// round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignedRole {
    /// One of the four known roles.
    Known(Role),
    /// A role name outside the fixed vocabulary.
    Unrecognised(String),
}

impl AssignedRole {
    /// The known role, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Unrecognised(_) => None,
        }
    }

    /// Whether the assigned role holds `capability`. Unknown roles never do.
    ///
    /// # Examples
    /// ```
    /// use client::domain::{AssignedRole, Capability};
    ///
    /// let role = AssignedRole::from("Администратор".to_owned());
    /// assert!(role.allows(Capability::ManageUsers));
    /// let unknown = AssignedRole::from("Superuser".to_owned());
    /// assert!(!unknown.allows(Capability::ManageUsers));
    /// ```
    pub fn allows(&self, capability: Capability) -> bool {
        self.role().is_some_and(|role| role.allows(capability))
    }

    /// Raw wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(role) => role.as_str(),
            Self::Unrecognised(raw) => raw.as_str(),
        }
    }
}

impl From<String> for AssignedRole {
    fn from(value: String) -> Self {
        match Role::from_wire(&value) {
            Some(role) => Self::Known(role),
            None => Self::Unrecognised(value),
        }
    }
}

impl From<AssignedRole> for String {
    fn from(value: AssignedRole) -> Self {
        match value {
            AssignedRole::Known(role) => role.as_str().to_owned(),
            AssignedRole::Unrecognised(raw) => raw,
        }
    }
}

impl From<Role> for AssignedRole {
    fn from(value: Role) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for AssignedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
