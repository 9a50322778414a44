//! Roles and the capabilities they grant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role assigned to every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user administration.
    Admin,
    /// Catalogue, supplier, and report access.
    Manager,
    /// Sales recording only.
    Staff,
}

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, edit, and delete products and suppliers.
    ManageCatalogue,
    /// Create, edit, and delete user accounts.
    ManageUsers,
    /// Record a sale against stock.
    RecordSales,
    /// Read aggregated reports.
    ViewReports,
}

impl Role {
    /// Returns `true` when this role grants `capability`.
    ///
    /// # Examples
    /// ```
    /// use stockroom::domain::{Capability, Role};
    ///
    /// assert!(Role::Admin.permits(Capability::ManageUsers));
    /// assert!(!Role::Manager.permits(Capability::ManageUsers));
    /// assert!(Role::Staff.permits(Capability::RecordSales));
    /// ```
    pub const fn permits(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => matches!(self, Self::Admin),
            Capability::ManageCatalogue | Capability::ViewReports => {
                matches!(self, Self::Admin | Self::Manager)
            }
            Capability::RecordSales => true,
        }
    }

    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
