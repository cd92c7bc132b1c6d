use super::{AddressId, Audit, UserId};
use crate::framework::document::document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// The acting principal, as supplied by the authentication layer.
///
/// Trusted as given; the catalog never verifies it against stored users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn admin(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn user(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may modify anything; everyone else only what they created.
    pub fn may_modify(&self, owner: Option<&UserId>) -> bool {
        self.is_admin() || owner == Some(&self.id)
    }
}

/// A stored user record, referenced by ownership fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub addresses: Vec<AddressId>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    fn from_params(id: UserId, params: UserCreate, audit: Audit) -> Self {
        Self {
            id,
            username: params.username,
            email: params.email,
            role: params.role,
            addresses: Vec::new(),
            audit,
        }
    }

    /// The principal this user acts as.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}

document!(User, create = UserCreate, collection = users, label = username, unique = email);
