//! Member repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist member rows and expose the per-member bulk deletes used by
//!   the member deletion cascade.
//!
//! # Invariants
//! - `delete_boards_by_member_id` also clears comments that hang on those
//!   boards, whoever wrote them; foreign keys would reject the delete
//!   otherwise.

use crate::model::member::{Member, MemberId, NewMember};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    email,
    password,
    nickname
FROM members";

/// Repository interface for member rows.
pub trait MemberRepository {
    /// Inserts a new member and returns it with its assigned id.
    fn insert(&self, member: &NewMember) -> RepoResult<Member>;
    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>>;
    /// Writes every mutable column of an existing member.
    fn save(&self, member: &Member) -> RepoResult<Member>;
    fn delete(&self, member: &Member) -> RepoResult<()>;
    /// Removes every comment authored by the member. Returns rows removed.
    fn delete_comments_by_member_id(&self, id: MemberId) -> RepoResult<usize>;
    /// Removes every board authored by the member. Returns boards removed.
    fn delete_boards_by_member_id(&self, id: MemberId) -> RepoResult<usize>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["members", "boards", "comments"])?;
        Ok(Self { conn })
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn insert(&self, member: &NewMember) -> RepoResult<Member> {
        self.conn.execute(
            "INSERT INTO members (email, password, nickname) VALUES (?1, ?2, ?3);",
            params![member.email(), member.password(), member.nickname()],
        )?;

        Ok(Member::from_parts(
            self.conn.last_insert_rowid(),
            member.email().to_string(),
            member.password().to_string(),
            member.nickname().to_string(),
        ))
    }

    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let member = self
            .conn
            .query_row(
                &format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_member_row,
            )
            .optional()?;
        Ok(member)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let member = self
            .conn
            .query_row(
                &format!("{MEMBER_SELECT_SQL} WHERE email = ?1 COLLATE NOCASE;"),
                [email],
                parse_member_row,
            )
            .optional()?;
        Ok(member)
    }

    fn save(&self, member: &Member) -> RepoResult<Member> {
        let changed = self.conn.execute(
            "UPDATE members
             SET
                email = ?1,
                password = ?2,
                nickname = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                member.email(),
                member.password(),
                member.nickname(),
                member.id()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "member",
                id: member.id(),
            });
        }

        Ok(member.clone())
    }

    fn delete(&self, member: &Member) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [member.id()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "member",
                id: member.id(),
            });
        }

        Ok(())
    }

    fn delete_comments_by_member_id(&self, id: MemberId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM comments WHERE member_id = ?1;", [id])?;
        Ok(removed)
    }

    fn delete_boards_by_member_id(&self, id: MemberId) -> RepoResult<usize> {
        self.conn.execute(
            "DELETE FROM comments
             WHERE board_id IN (SELECT id FROM boards WHERE member_id = ?1);",
            [id],
        )?;
        let removed = self
            .conn
            .execute("DELETE FROM boards WHERE member_id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_member_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member::from_parts(
        row.get("id")?,
        row.get("email")?,
        row.get("password")?,
        row.get("nickname")?,
    ))
}
