//! Session value object and record scoping.
//!
//! The session is passed explicitly into every store operation; there is
//! no ambient role or identity state anywhere in the system. An ASHA worker
//! sees every record in her area; a beneficiary sees only the mother
//! records registered under her phone number, plus the children of those
//! mothers.

use sakhi_core::records::Mother;
use sakhi_types::{Phone, Role};

/// The acting user for one request or command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    /// Identity for beneficiary scoping; `None` for worker sessions.
    pub phone: Option<Phone>,
    pub display_name: String,
}

impl Session {
    /// A health-worker session with full visibility.
    pub fn asha(display_name: impl Into<String>) -> Self {
        Self {
            role: Role::Asha,
            phone: None,
            display_name: display_name.into(),
        }
    }

    /// A beneficiary session scoped to records under `phone`.
    pub fn beneficiary(phone: Phone, display_name: impl Into<String>) -> Self {
        Self {
            role: Role::Beneficiary,
            phone: Some(phone),
            display_name: display_name.into(),
        }
    }

    /// Whether this session may see the given mother record.
    pub fn can_see_mother(&self, mother: &Mother) -> bool {
        match self.role {
            Role::Asha => true,
            Role::Beneficiary => self
                .phone
                .as_ref()
                .is_some_and(|phone| mother.phone == phone.as_str()),
        }
    }
}
