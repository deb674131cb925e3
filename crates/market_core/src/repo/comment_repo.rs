//! Comment repository contracts and SQLite implementation.

use crate::model::board::BoardId;
use crate::model::comment::{Comment, CommentId, NewComment};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    member_id,
    board_id,
    content,
    created_at,
    updated_at
FROM comments";

/// Repository interface for comment rows.
pub trait CommentRepository {
    fn insert(&self, comment: &NewComment) -> RepoResult<Comment>;
    fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Lists comments on one board, oldest first.
    fn list_by_board(&self, board_id: BoardId) -> RepoResult<Vec<Comment>>;
    fn save(&self, comment: &Comment) -> RepoResult<Comment>;
    fn delete(&self, id: CommentId) -> RepoResult<()>;
    /// Removes every comment on one board. Returns rows removed.
    fn delete_by_board_id(&self, board_id: BoardId) -> RepoResult<usize>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["comments"])?;
        Ok(Self { conn })
    }

    fn load(&self, id: CommentId) -> RepoResult<Comment> {
        self.find_by_id(id)?.ok_or(RepoError::NotFound {
            entity: "comment",
            id,
        })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn insert(&self, comment: &NewComment) -> RepoResult<Comment> {
        self.conn.execute(
            "INSERT INTO comments (member_id, board_id, content) VALUES (?1, ?2, ?3);",
            params![comment.member_id(), comment.board_id(), comment.content()],
        )?;

        self.load(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let comment = self
            .conn
            .query_row(
                &format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_comment_row,
            )
            .optional()?;
        Ok(comment)
    }

    fn list_by_board(&self, board_id: BoardId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE board_id = ?1 ORDER BY id ASC;"
        ))?;
        let comments = stmt
            .query_map([board_id], parse_comment_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }

    fn save(&self, comment: &Comment) -> RepoResult<Comment> {
        let changed = self.conn.execute(
            "UPDATE comments
             SET
                content = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![comment.content(), comment.id()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id: comment.id(),
            });
        }

        self.load(comment.id())
    }

    fn delete(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id,
            });
        }
        Ok(())
    }

    fn delete_by_board_id(&self, board_id: BoardId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM comments WHERE board_id = ?1;", [board_id])?;
        Ok(removed)
    }
}

fn parse_comment_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment::from_parts(
        row.get("id")?,
        row.get("member_id")?,
        row.get("board_id")?,
        row.get("content")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}
