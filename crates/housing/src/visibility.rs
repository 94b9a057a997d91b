use flatseller_database::{FlatStatus, Role};

/// Which flats of a house a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatVisibility {
    /// Every flat regardless of status.
    All,
    /// Only flats whose listing has been approved.
    ApprovedOnly,
}

impl FlatVisibility {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => FlatVisibility::All,
            Role::User => FlatVisibility::ApprovedOnly,
        }
    }

    pub(crate) fn status_filter(self) -> Option<FlatStatus> {
        match self {
            FlatVisibility::All => None,
            FlatVisibility::ApprovedOnly => Some(FlatStatus::Approved),
        }
    }
}
