//! Role checks for the current user.
//!
//! The store performs no authorization. Callers that expose mutating
//! affordances consult these predicates first; the user and their roles
//! come from whatever session provider the caller has.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role required to view records.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role required to create, edit or delete records.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// The signed-in user, as reported by the session provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Login identity, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Granted roles.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl CurrentUser {
    /// Creates a user with the given roles.
    pub fn with_roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            email: None,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` if the user holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Returns `true` if there is a user and they hold `role`.
#[must_use]
pub fn has_role(user: Option<&CurrentUser>, role: &str) -> bool {
    user.is_some_and(|u| u.has_role(role))
}

/// What a user may do with records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// May list and view records.
    pub can_view: bool,
    /// May create, edit and delete records.
    pub can_mutate: bool,
}

impl Access {
    /// Derives access from the current user.
    #[must_use]
    pub fn for_user(user: Option<&CurrentUser>) -> Self {
        Self {
            can_view: has_role(user, ROLE_USER) || has_role(user, ROLE_ADMIN),
            can_mutate: has_role(user, ROLE_ADMIN),
        }
    }
}
