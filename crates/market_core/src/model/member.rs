//! Member aggregate root.
//!
//! # Invariants
//! - A `Member` always has a storage id; unsaved members are `NewMember`.
//! - `nickname` changes only through [`Member::change_nickname`].
//! - A member owns at most one address, linked from the address side.

use crate::model::validation::{require_text, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

pub type MemberId = i64;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// Persisted member record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    email: String,
    password: String,
    nickname: String,
}

impl Member {
    /// Starts a builder for a member that is not stored yet.
    pub fn builder() -> NewMemberBuilder {
        NewMemberBuilder::default()
    }

    pub(crate) fn from_parts(
        id: MemberId,
        email: String,
        password: String,
        nickname: String,
    ) -> Self {
        Self {
            id,
            email,
            password,
            nickname,
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Replaces the nickname.
    ///
    /// The member is left untouched when `nickname` is missing or blank.
    pub fn change_nickname(&mut self, nickname: Option<&str>) -> Result<(), ValidationError> {
        let nickname = require_text(nickname, ValidationError::BlankNickname)?;
        self.nickname = nickname.to_string();
        Ok(())
    }
}

/// Validated member that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    email: String,
    nickname: String,
    password: String,
}

impl NewMember {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

/// Builder for [`NewMember`]. Validation runs in [`NewMemberBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct NewMemberBuilder {
    email: Option<String>,
    nickname: Option<String>,
    password: Option<String>,
}

impl NewMemberBuilder {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Sets the stored credential. The core treats it as an opaque string.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Checks email, nickname and password in that order.
    pub fn build(self) -> Result<NewMember, ValidationError> {
        let email = require_text(self.email.as_deref(), ValidationError::BlankEmail)?.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::MalformedEmail);
        }
        let nickname = require_text(self.nickname.as_deref(), ValidationError::BlankNickname)?;
        let password = require_text(self.password.as_deref(), ValidationError::BlankPassword)?;

        Ok(NewMember {
            email: email.to_string(),
            nickname: nickname.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Member;
    use crate::model::validation::ValidationError;

    #[test]
    fn builder_accepts_complete_input() {
        let new_member = Member::builder()
            .email(" email@example.com ")
            .nickname("nickname")
            .password("secret")
            .build()
            .expect("complete input should build");
        assert_eq!(new_member.email(), "email@example.com");
        assert_eq!(new_member.nickname(), "nickname");
    }

    #[test]
    fn builder_rejects_malformed_email() {
        let err = Member::builder()
            .email("not-an-email")
            .nickname("nickname")
            .password("secret")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MalformedEmail);
    }

    #[test]
    fn builder_reports_first_missing_field() {
        let err = Member::builder().email("a@b.co").build().unwrap_err();
        assert_eq!(err, ValidationError::BlankNickname);
    }

    #[test]
    fn change_nickname_keeps_old_value_on_blank_input() {
        let mut member = Member::from_parts(
            1,
            "email@example.com".to_string(),
            "secret".to_string(),
            "nickname".to_string(),
        );

        assert_eq!(
            member.change_nickname(Some("   ")),
            Err(ValidationError::BlankNickname)
        );
        assert_eq!(member.change_nickname(None), Err(ValidationError::BlankNickname));
        assert_eq!(member.nickname(), "nickname");

        member.change_nickname(Some("newNickname")).unwrap();
        assert_eq!(member.nickname(), "newNickname");
    }
}
