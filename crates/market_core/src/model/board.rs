//! Board (listing) records.
//!
//! # Invariants
//! - A board always belongs to exactly one member (`member_id`).
//! - `title` and `content` are never blank; `price` is never negative.

use crate::model::member::MemberId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type BoardId = i64;

/// Sale state of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    /// Open for offers.
    #[default]
    Selling,
    /// Held for a buyer.
    Reserved,
    /// Deal closed.
    SoldOut,
}

/// Create/update request for a board.
///
/// `status` falls back to the current status on update and to
/// [`BoardStatus::Selling`] on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub status: Option<BoardStatus>,
}

impl BoardDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, price: i64) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            price: Some(price),
            status: None,
        }
    }

    pub fn with_status(mut self, status: BoardStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Persisted board record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    id: BoardId,
    member_id: MemberId,
    title: String,
    content: String,
    price: i64,
    status: BoardStatus,
    created_at: i64,
    updated_at: i64,
}

impl Board {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: BoardId,
        member_id: MemberId,
        title: String,
        content: String,
        price: i64,
        status: BoardStatus,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            member_id,
            title,
            content,
            price,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// Epoch ms.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Epoch ms.
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Overwrites title, content, price and (when given) status.
    pub fn update_details(&mut self, draft: &BoardDraft) -> Result<(), ValidationError> {
        let (title, content, price) = validate_draft(draft)?;
        self.title = title.to_string();
        self.content = content.to_string();
        self.price = price;
        if let Some(status) = draft.status {
            self.status = status;
        }
        Ok(())
    }
}

/// Validated board not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    member_id: MemberId,
    title: String,
    content: String,
    price: i64,
    status: BoardStatus,
}

impl NewBoard {
    pub fn from_draft(member_id: MemberId, draft: &BoardDraft) -> Result<Self, ValidationError> {
        let (title, content, price) = validate_draft(draft)?;
        Ok(Self {
            member_id,
            title: title.to_string(),
            content: content.to_string(),
            price,
            status: draft.status.unwrap_or_default(),
        })
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }
}

fn validate_draft(draft: &BoardDraft) -> Result<(&str, &str, i64), ValidationError> {
    let title = require_text(draft.title.as_deref(), ValidationError::BlankTitle)?;
    let content = require_text(draft.content.as_deref(), ValidationError::BlankContent)?;
    let price = draft.price.ok_or(ValidationError::MissingPrice)?;
    if price < 0 {
        return Err(ValidationError::NegativePrice);
    }
    Ok((title, content, price))
}

#[cfg(test)]
mod tests {
    use super::{BoardDraft, BoardStatus, NewBoard};
    use crate::model::validation::ValidationError;

    #[test]
    fn new_board_defaults_to_selling() {
        let board = NewBoard::from_draft(7, &BoardDraft::new("desk", "oak desk", 30_000)).unwrap();
        assert_eq!(board.status(), BoardStatus::Selling);
        assert_eq!(board.member_id(), 7);
    }

    #[test]
    fn draft_validation_checks_price() {
        let mut draft = BoardDraft::new("desk", "oak desk", -1);
        assert_eq!(
            NewBoard::from_draft(1, &draft).unwrap_err(),
            ValidationError::NegativePrice
        );
        draft.price = None;
        assert_eq!(
            NewBoard::from_draft(1, &draft).unwrap_err(),
            ValidationError::MissingPrice
        );
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&BoardStatus::SoldOut).unwrap();
        assert_eq!(json, "\"sold_out\"");
    }
}
