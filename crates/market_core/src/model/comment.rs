//! Comment records attached to boards.

use crate::model::board::BoardId;
use crate::model::member::MemberId;
use crate::model::validation::{require_text, ValidationError};
use serde::Serialize;

pub type CommentId = i64;

/// Persisted comment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    id: CommentId,
    member_id: MemberId,
    board_id: BoardId,
    content: String,
    created_at: i64,
    updated_at: i64,
}

impl Comment {
    pub(crate) fn from_parts(
        id: CommentId,
        member_id: MemberId,
        board_id: BoardId,
        content: String,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            member_id,
            board_id,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn update_content(&mut self, content: Option<&str>) -> Result<(), ValidationError> {
        let content = require_text(content, ValidationError::BlankComment)?;
        self.content = content.to_string();
        Ok(())
    }
}

/// Validated comment not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    member_id: MemberId,
    board_id: BoardId,
    content: String,
}

impl NewComment {
    pub fn new(
        member_id: MemberId,
        board_id: BoardId,
        content: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let content = require_text(content, ValidationError::BlankComment)?;
        Ok(Self {
            member_id,
            board_id,
            content: content.to_string(),
        })
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
