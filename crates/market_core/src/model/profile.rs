//! Externally shaped projections and update inputs.
//!
//! Inputs keep every field optional so that a missing value reaches
//! validation instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Read view of a member's shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetail {
    pub street: String,
    pub detail: String,
    pub zipcode: String,
}

/// Read view of a member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub email: String,
    pub nickname: String,
    /// `None` when the member has not attached an address yet.
    pub address: Option<AddressDetail>,
}

/// Profile update request. Only `nickname` is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub nickname: Option<String>,
}

impl ProfileUpdate {
    pub fn nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: Some(nickname.into()),
        }
    }
}

/// Address create/update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdate {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
}

impl AddressUpdate {
    pub fn new(
        street: impl Into<String>,
        detail: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            street: Some(street.into()),
            detail: Some(detail.into()),
            zipcode: Some(zipcode.into()),
        }
    }
}
