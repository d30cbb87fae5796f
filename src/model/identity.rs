//! Who is using the client, and what they may do.

/// The current user.
///
/// The same predicates gate actions twice: once in the client, to refuse early
/// with a status message, and again in the store, which has the final word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Name recorded as the author of new messages.
    pub user: String,
    /// Admins may pin, close and moderate any message.
    pub admin: bool,
}

impl Identity {
    /// Identity with the given name and no admin rights.
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            user: name.into(),
            admin: false,
        }
    }

    /// Identity with admin rights.
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            user: name.into(),
            admin: true,
        }
    }

    /// Edit and delete: the author or an admin.
    pub fn can_modify(&self, author: &str) -> bool {
        self.admin || self.user == author
    }

    /// Pin and close toggles.
    pub fn can_moderate(&self) -> bool {
        self.admin
    }
}
