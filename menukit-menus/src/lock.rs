//! Authorization of the identities allowed to drive a menu.

use menukit_core::Actor;
use twilight_model::id::{
    Id,
    marker::{RoleMarker, UserMarker},
};

/// Who may emit signals or answers for a menu.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Lock {
    /// Anyone except the bot itself.
    Unrestricted,
    /// Only the user who invoked the menu.
    #[default]
    Invoker,
    /// Only this user.
    User(Id<UserMarker>),
    /// Anyone holding this role. Never matches outside guilds.
    Role(Id<RoleMarker>),
}

impl Lock {
    /// Whether `actor` may drive a menu invoked by `invoker`.
    pub fn permits(&self, invoker: Id<UserMarker>, actor: &Actor) -> bool {
        match self {
            Lock::Unrestricted => true,
            Lock::Invoker => actor.user_id == invoker,
            Lock::User(user_id) => actor.user_id == *user_id,
            Lock::Role(role_id) => actor.has_role(*role_id),
        }
    }
}
