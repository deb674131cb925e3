//! Core domain logic for the second-hand market backend.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{Address, AddressId, NewAddress};
pub use model::board::{Board, BoardDraft, BoardId, BoardStatus, NewBoard};
pub use model::comment::{Comment, CommentId, NewComment};
pub use model::member::{Member, MemberId, NewMember, NewMemberBuilder};
pub use model::profile::{AddressDetail, AddressUpdate, MemberProfile, ProfileUpdate};
pub use model::validation::ValidationError;
pub use repo::address_repo::{AddressRepository, SqliteAddressRepository};
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::{RepoError, RepoResult, SqliteUnitOfWork, UnitOfWork};
pub use service::board_service::{BoardService, BoardServiceError, BoardServiceResult};
pub use service::member_service::{
    AddressKey, MemberService, MemberServiceError, MemberServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
