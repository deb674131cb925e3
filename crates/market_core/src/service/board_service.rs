//! Board and comment use-case service.
//!
//! # Invariants
//! - Boards and comments are only created for existing members/boards.
//! - Deleting a board removes its comments first, in the same unit of work.

use crate::model::board::{Board, BoardDraft, BoardId, NewBoard};
use crate::model::comment::{Comment, CommentId, NewComment};
use crate::model::member::MemberId;
use crate::model::validation::ValidationError;
use crate::repo::board_repo::BoardRepository;
use crate::repo::comment_repo::CommentRepository;
use crate::repo::member_repo::MemberRepository;
use crate::repo::{RepoError, UnitOfWork};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Service error for board/comment use-cases.
#[derive(Debug)]
pub enum BoardServiceError {
    MemberNotFound(MemberId),
    BoardNotFound(BoardId),
    CommentNotFound(CommentId),
    /// A required field is missing or invalid. Carries the user-facing message.
    InvalidInput(String),
    Repo(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::InvalidInput(message) => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BoardServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for BoardServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value.message().to_string())
    }
}

/// Board/comment service facade.
pub struct BoardService<M, B, C, U>
where
    M: MemberRepository,
    B: BoardRepository,
    C: CommentRepository,
    U: UnitOfWork,
{
    members: M,
    boards: B,
    comments: C,
    uow: U,
}

impl<M, B, C, U> BoardService<M, B, C, U>
where
    M: MemberRepository,
    B: BoardRepository,
    C: CommentRepository,
    U: UnitOfWork,
{
    pub fn new(members: M, boards: B, comments: C, uow: U) -> Self {
        Self {
            members,
            boards,
            comments,
            uow,
        }
    }

    /// Posts a listing for `member_id`.
    pub fn create_board(
        &self,
        member_id: MemberId,
        draft: &BoardDraft,
    ) -> BoardServiceResult<Board> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            self.ensure_member(member_id)?;
            let new_board = NewBoard::from_draft(member_id, draft)?;
            let board = self.boards.insert(&new_board)?;
            info!(
                "event=board_create module=service status=ok board_id={} member_id={}",
                board.id(),
                member_id
            );
            Ok(board)
        })
    }

    pub fn get_board(&self, id: BoardId) -> BoardServiceResult<Board> {
        self.load_board(id)
    }

    /// Lists a member's boards in creation order.
    pub fn list_boards_by_member(&self, member_id: MemberId) -> BoardServiceResult<Vec<Board>> {
        self.ensure_member(member_id)?;
        Ok(self.boards.list_by_member(member_id)?)
    }

    /// Overwrites title, content, price and optionally status.
    pub fn update_board(&self, id: BoardId, draft: &BoardDraft) -> BoardServiceResult<Board> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            let mut board = self.load_board(id)?;
            board.update_details(draft)?;
            let board = self.boards.save(&board)?;
            info!("event=board_update module=service status=ok board_id={}", board.id());
            Ok(board)
        })
    }

    pub fn delete_board(&self, id: BoardId) -> BoardServiceResult<()> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            let board = self.load_board(id)?;
            let comments_deleted = self.comments.delete_by_board_id(board.id())?;
            self.boards.delete(board.id())?;
            info!(
                "event=board_delete module=service status=ok board_id={} comments_deleted={}",
                board.id(),
                comments_deleted
            );
            Ok(())
        })
    }

    /// Adds a comment by `member_id` on `board_id`.
    pub fn create_comment(
        &self,
        member_id: MemberId,
        board_id: BoardId,
        content: Option<&str>,
    ) -> BoardServiceResult<Comment> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            self.ensure_member(member_id)?;
            self.load_board(board_id)?;
            let new_comment = NewComment::new(member_id, board_id, content)?;
            let comment = self.comments.insert(&new_comment)?;
            info!(
                "event=comment_create module=service status=ok comment_id={} board_id={} member_id={}",
                comment.id(),
                board_id,
                member_id
            );
            Ok(comment)
        })
    }

    /// Lists comments on a board, oldest first.
    pub fn list_comments_by_board(&self, board_id: BoardId) -> BoardServiceResult<Vec<Comment>> {
        self.load_board(board_id)?;
        Ok(self.comments.list_by_board(board_id)?)
    }

    pub fn update_comment(
        &self,
        id: CommentId,
        content: Option<&str>,
    ) -> BoardServiceResult<Comment> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            let mut comment = self
                .comments
                .find_by_id(id)?
                .ok_or(BoardServiceError::CommentNotFound(id))?;
            comment.update_content(content)?;
            let comment = self.comments.save(&comment)?;
            info!(
                "event=comment_update module=service status=ok comment_id={}",
                comment.id()
            );
            Ok(comment)
        })
    }

    pub fn delete_comment(&self, id: CommentId) -> BoardServiceResult<()> {
        self.uow.atomically(|| -> BoardServiceResult<_> {
            if self.comments.find_by_id(id)?.is_none() {
                return Err(BoardServiceError::CommentNotFound(id));
            }
            self.comments.delete(id)?;
            info!("event=comment_delete module=service status=ok comment_id={id}");
            Ok(())
        })
    }

    fn ensure_member(&self, id: MemberId) -> BoardServiceResult<()> {
        match self.members.find_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(BoardServiceError::MemberNotFound(id)),
        }
    }

    fn load_board(&self, id: BoardId) -> BoardServiceResult<Board> {
        self.boards
            .find_by_id(id)?
            .ok_or(BoardServiceError::BoardNotFound(id))
    }
}
