#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin = 1,
    Hr = 2,
    Employee = 3,
    System = 4,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Employee),
            4 => Some(Role::System),
            _ => None,
        }
    }

    /// Roles allowed to act on other users' requests (approve/reject,
    /// pending queue, other users' balances).
    pub fn can_approve(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}
