use serde::{Serialize, Serializer};
use std::fmt;

/// Who a permission is granted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Any,
    Guests,
    Users,
    User(String),
    Team(String),
    Member(String),
}

impl Role {
    pub fn any() -> Self {
        Role::Any
    }

    pub fn user<S: Into<String>>(id: S) -> Self {
        Role::User(id.into())
    }

    pub fn team<S: Into<String>>(id: S) -> Self {
        Role::Team(id.into())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Any => write!(f, "any"),
            Role::Guests => write!(f, "guests"),
            Role::Users => write!(f, "users"),
            Role::User(id) => write!(f, "user:{}", id),
            Role::Team(id) => write!(f, "team:{}", id),
            Role::Member(id) => write!(f, "member:{}", id),
        }
    }
}

/// Action part of a permission string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Write,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Write => "write",
        }
    }
}

/// Permission rendered the way the storage API expects it: `read("any")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub action: Action,
    pub role: Role,
}

impl Permission {
    pub fn read(role: Role) -> Self {
        Self { action: Action::Read, role }
    }

    pub fn create(role: Role) -> Self {
        Self { action: Action::Create, role }
    }

    pub fn update(role: Role) -> Self {
        Self { action: Action::Update, role }
    }

    pub fn delete(role: Role) -> Self {
        Self { action: Action::Delete, role }
    }

    pub fn write(role: Role) -> Self {
        Self { action: Action::Write, role }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.action.as_str(), self.role)
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Document identifier sent with create calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id {
    /// Lets the server generate the identifier
    Unique,
    Custom(String),
}

impl Id {
    pub fn unique() -> Self {
        Id::Unique
    }

    pub fn custom<S: Into<String>>(id: S) -> Self {
        Id::Custom(id.into())
    }

    /// `None`/empty/`unique()` all map to a server generated id
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("unique()") => Id::Unique,
            Some(other) => Id::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Unique => write!(f, "unique()"),
            Id::Custom(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full CRUD for anyone, used for the scenario bucket
pub fn public_crud() -> Vec<Permission> {
    vec![
        Permission::read(Role::any()),
        Permission::create(Role::any()),
        Permission::update(Role::any()),
        Permission::delete(Role::any()),
    ]
}

/// Read/update/delete for anyone, used for uploaded files
pub fn public_rud() -> Vec<Permission> {
    vec![
        Permission::read(Role::any()),
        Permission::update(Role::any()),
        Permission::delete(Role::any()),
    ]
}
