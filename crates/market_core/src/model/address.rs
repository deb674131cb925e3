//! Shipping address owned by exactly one member.
//!
//! # Invariants
//! - `member_id` never changes after creation.
//! - `street`, `detail` and `zipcode` are never blank.
//! - Validation order is street, detail, zipcode; the first failure wins.

use crate::model::member::MemberId;
use crate::model::profile::{AddressDetail, AddressUpdate};
use crate::model::validation::{require_text, ValidationError};

pub type AddressId = i64;

/// Persisted address record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    id: AddressId,
    member_id: MemberId,
    street: String,
    detail: String,
    zipcode: String,
}

impl Address {
    pub(crate) fn from_parts(
        id: AddressId,
        member_id: MemberId,
        street: String,
        detail: String,
        zipcode: String,
    ) -> Self {
        Self {
            id,
            member_id,
            street,
            detail,
            zipcode,
        }
    }

    pub fn id(&self) -> AddressId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    /// Overwrites all three fields, or none of them when validation fails.
    pub fn update(&mut self, update: &AddressUpdate) -> Result<(), ValidationError> {
        let (street, detail, zipcode) = validate_fields(update)?;
        self.street = street.to_string();
        self.detail = detail.to_string();
        self.zipcode = zipcode.to_string();
        Ok(())
    }

    pub fn to_detail(&self) -> AddressDetail {
        AddressDetail {
            street: self.street.clone(),
            detail: self.detail.clone(),
            zipcode: self.zipcode.clone(),
        }
    }
}

/// Validated address not yet attached to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    street: String,
    detail: String,
    zipcode: String,
}

impl NewAddress {
    pub fn from_update(update: &AddressUpdate) -> Result<Self, ValidationError> {
        let (street, detail, zipcode) = validate_fields(update)?;
        Ok(Self {
            street: street.to_string(),
            detail: detail.to_string(),
            zipcode: zipcode.to_string(),
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }
}

fn validate_fields(update: &AddressUpdate) -> Result<(&str, &str, &str), ValidationError> {
    let street = require_text(update.street.as_deref(), ValidationError::BlankStreet)?;
    let detail = require_text(update.detail.as_deref(), ValidationError::BlankDetail)?;
    let zipcode = require_text(update.zipcode.as_deref(), ValidationError::BlankZipcode)?;
    Ok((street, detail, zipcode))
}

#[cfg(test)]
mod tests {
    use super::{Address, NewAddress};
    use crate::model::profile::AddressUpdate;
    use crate::model::validation::ValidationError;

    fn sample() -> Address {
        Address::from_parts(
            1,
            1,
            "street".to_string(),
            "detail".to_string(),
            "00000".to_string(),
        )
    }

    #[test]
    fn update_reports_only_first_blank_field() {
        let mut address = sample();
        let all_blank = AddressUpdate::new(" ", " ", " ");
        assert_eq!(address.update(&all_blank), Err(ValidationError::BlankStreet));

        let blank_detail = AddressUpdate {
            street: Some("Street".to_string()),
            detail: None,
            zipcode: None,
        };
        assert_eq!(address.update(&blank_detail), Err(ValidationError::BlankDetail));

        let blank_zipcode = AddressUpdate::new("Street", "Detail", "   ");
        assert_eq!(
            address.update(&blank_zipcode),
            Err(ValidationError::BlankZipcode)
        );

        assert_eq!(address, sample());
    }

    #[test]
    fn update_overwrites_every_field() {
        let mut address = sample();
        address
            .update(&AddressUpdate::new("new Street", "new Detail", "11111"))
            .unwrap();
        assert_eq!(address.street(), "new Street");
        assert_eq!(address.detail(), "new Detail");
        assert_eq!(address.zipcode(), "11111");
        assert_eq!(address.member_id(), 1);
    }

    #[test]
    fn new_address_uses_same_rules() {
        let err = NewAddress::from_update(&AddressUpdate::default()).unwrap_err();
        assert_eq!(err, ValidationError::BlankStreet);
    }
}
