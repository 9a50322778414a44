//! Suppliers of catalogue products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_optional_text, require_text};
use super::{EmailAddress, Error, SupplierId};

/// A supplier contact record.
///
/// ## Invariants
/// - `name`, `contact_person`, `phone`, and `address` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    id: SupplierId,
    name: String,
    contact_person: String,
    email: EmailAddress,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Supplier {
    pub(crate) fn create(id: SupplierId, draft: NewSupplier, now: DateTime<Utc>) -> Result<Self, Error> {
        draft.validate()?;
        let NewSupplier {
            name,
            contact_person,
            email,
            phone,
            address,
        } = draft;
        Ok(Self {
            id,
            name: name.trim().to_owned(),
            contact_person: contact_person.trim().to_owned(),
            email,
            phone: phone.trim().to_owned(),
            address: address.trim().to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn restore(
        id: SupplierId,
        draft: NewSupplier,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let mut supplier = Self::create(id, draft, created_at)?;
        supplier.updated_at = updated_at;
        Ok(supplier)
    }

    pub(crate) fn apply(&mut self, patch: SupplierPatch, now: DateTime<Utc>) -> Result<(), Error> {
        patch.validate()?;
        let SupplierPatch {
            name,
            contact_person,
            email,
            phone,
            address,
        } = patch;
        if let Some(value) = name {
            self.name = value.trim().to_owned();
        }
        if let Some(value) = contact_person {
            self.contact_person = value.trim().to_owned();
        }
        if let Some(value) = email {
            self.email = value;
        }
        if let Some(value) = phone {
            self.phone = value.trim().to_owned();
        }
        if let Some(value) = address {
            self.address = value.trim().to_owned();
        }
        self.updated_at = now;
        Ok(())
    }

    /// Supplier identifier.
    pub fn id(&self) -> &SupplierId {
        &self.id
    }

    /// Trading name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Primary contact.
    pub fn contact_person(&self) -> &str {
        self.contact_person.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Input for creating a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    /// Trading name.
    pub name: String,
    /// Primary contact.
    pub contact_person: String,
    /// Contact email.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: String,
}

impl NewSupplier {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), Error> {
        require_text("name", &self.name)?;
        require_text("contactPerson", &self.contact_person)?;
        require_text("phone", &self.phone)?;
        require_text("address", &self.address)
    }
}

/// Partial update for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPatch {
    /// New trading name.
    pub name: Option<String>,
    /// New contact.
    pub contact_person: Option<String>,
    /// New email.
    pub email: Option<EmailAddress>,
    /// New phone.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
}

impl SupplierPatch {
    /// Check the fields the patch sets.
    pub fn validate(&self) -> Result<(), Error> {
        require_optional_text("name", self.name.as_deref())?;
        require_optional_text("contactPerson", self.contact_person.as_deref())?;
        require_optional_text("phone", self.phone.as_deref())?;
        require_optional_text("address", self.address.as_deref())
    }
}

/// Id and name pair for supplier pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierOption {
    /// Supplier identifier.
    pub id: SupplierId,
    /// Trading name.
    pub name: String,
}

impl From<&Supplier> for SupplierOption {
    fn from(value: &Supplier) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn draft() -> NewSupplier {
        NewSupplier {
            name: "Lian Li Official".to_owned(),
            contact_person: "Raihan Kabir".to_owned(),
            email: EmailAddress::new("raihan@lianli-distribution.example").expect("valid email"),
            phone: "+8801700000010".to_owned(),
            address: "Multiplan Center, Dhaka".to_owned(),
        }
    }

    #[rstest]
    fn create_rejects_blank_contact(mut draft: NewSupplier) {
        draft.contact_person = " ".to_owned();
        let err = Supplier::create(SupplierId::random(), draft, at(1)).expect_err("blank contact");
        assert_eq!(err.details(), Some(&json!({ "field": "contactPerson" })));
    }

    #[rstest]
    fn apply_refreshes_updated_at(draft: NewSupplier) {
        let mut supplier =
            Supplier::create(SupplierId::new("10").expect("valid id"), draft, at(1)).expect("valid");
        let patch = SupplierPatch {
            phone: Some("+8801700000099".to_owned()),
            ..SupplierPatch::default()
        };
        supplier.apply(patch, at(2)).expect("valid patch");
        assert_eq!(supplier.phone(), "+8801700000099");
        assert_eq!(supplier.name(), "Lian Li Official");
        assert_eq!(supplier.created_at(), at(1));
        assert_eq!(supplier.updated_at(), at(2));
    }

    #[rstest]
    fn option_carries_id_and_name(draft: NewSupplier) {
        let supplier =
            Supplier::create(SupplierId::new("10").expect("valid id"), draft, at(1)).expect("valid");
        let option = SupplierOption::from(&supplier);
        assert_eq!(option.id.as_str(), "10");
        assert_eq!(option.name, "Lian Li Official");
    }
}
