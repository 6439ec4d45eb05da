//! Row ownership scope
//!
//! Every repository method that touches user-owned rows takes an [`Owner`]
//! and binds it into the `WHERE` clause. Handlers get one from
//! [`AuthUser::owner`](crate::auth::AuthUser::owner).

use uuid::Uuid;

/// The user whose rows a query may see or change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner(Uuid);

impl Owner {
    pub fn new(user_id: Uuid) -> Self {
        Self(user_id)
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
