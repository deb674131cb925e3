//! Board repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listings are deterministic: `id ASC`.
//! - `board_status` text values are `selling|reserved|sold_out`.

use crate::model::board::{Board, BoardId, BoardStatus, NewBoard};
use crate::model::member::MemberId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const BOARD_SELECT_SQL: &str = "SELECT
    id,
    member_id,
    title,
    content,
    price,
    board_status,
    created_at,
    updated_at
FROM boards";

/// Repository interface for board rows.
pub trait BoardRepository {
    fn insert(&self, board: &NewBoard) -> RepoResult<Board>;
    fn find_by_id(&self, id: BoardId) -> RepoResult<Option<Board>>;
    fn list_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Board>>;
    /// Writes mutable columns and returns the refreshed row.
    fn save(&self, board: &Board) -> RepoResult<Board>;
    fn delete(&self, id: BoardId) -> RepoResult<()>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["boards"])?;
        Ok(Self { conn })
    }

    fn load(&self, id: BoardId) -> RepoResult<Board> {
        self.find_by_id(id)?
            .ok_or(RepoError::NotFound { entity: "board", id })
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn insert(&self, board: &NewBoard) -> RepoResult<Board> {
        self.conn.execute(
            "INSERT INTO boards (member_id, title, content, price, board_status)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                board.member_id(),
                board.title(),
                board.content(),
                board.price(),
                board_status_to_db(board.status()),
            ],
        )?;

        self.load(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: BoardId) -> RepoResult<Option<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }
        Ok(None)
    }

    fn list_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Board>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOARD_SELECT_SQL} WHERE member_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([member_id])?;
        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(parse_board_row(row)?);
        }
        Ok(boards)
    }

    fn save(&self, board: &Board) -> RepoResult<Board> {
        let changed = self.conn.execute(
            "UPDATE boards
             SET
                title = ?1,
                content = ?2,
                price = ?3,
                board_status = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                board.title(),
                board.content(),
                board.price(),
                board_status_to_db(board.status()),
                board.id(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "board",
                id: board.id(),
            });
        }

        self.load(board.id())
    }

    fn delete(&self, id: BoardId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM boards WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "board", id });
        }
        Ok(())
    }
}

fn parse_board_row(row: &Row<'_>) -> RepoResult<Board> {
    let status_text: String = row.get("board_status")?;
    let status = parse_board_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid board status `{status_text}` in boards.board_status"
        ))
    })?;

    Ok(Board::from_parts(
        row.get("id")?,
        row.get("member_id")?,
        row.get("title")?,
        row.get("content")?,
        row.get("price")?,
        status,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}

fn board_status_to_db(status: BoardStatus) -> &'static str {
    match status {
        BoardStatus::Selling => "selling",
        BoardStatus::Reserved => "reserved",
        BoardStatus::SoldOut => "sold_out",
    }
}

fn parse_board_status(value: &str) -> Option<BoardStatus> {
    match value {
        "selling" => Some(BoardStatus::Selling),
        "reserved" => Some(BoardStatus::Reserved),
        "sold_out" => Some(BoardStatus::SoldOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{board_status_to_db, parse_board_status};
    use crate::model::board::BoardStatus;

    #[test]
    fn status_text_is_stable() {
        for status in [BoardStatus::Selling, BoardStatus::Reserved, BoardStatus::SoldOut] {
            assert_eq!(parse_board_status(board_status_to_db(status)), Some(status));
        }
        assert_eq!(parse_board_status("SOLD"), None);
    }
}
