#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin = 1,
    Hr = 2,
    Viewer = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Viewer),
            _ => None,
        }
    }

    /// Roles allowed to read attendance reports.
    pub fn can_read_reports(self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}
