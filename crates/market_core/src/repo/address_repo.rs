//! Address repository contracts and SQLite implementation.
//!
//! The member -> address direction is answered by `find_by_member_id`;
//! members never store an address id.

use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::member::MemberId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ADDRESS_SELECT_SQL: &str = "SELECT
    id,
    member_id,
    street,
    detail,
    zipcode
FROM addresses";

/// Repository interface for address rows.
pub trait AddressRepository {
    fn insert(&self, member_id: MemberId, address: &NewAddress) -> RepoResult<Address>;
    fn find_by_id(&self, id: AddressId) -> RepoResult<Option<Address>>;
    /// Loads the address owned by `member_id`, if any.
    fn find_by_member_id(&self, member_id: MemberId) -> RepoResult<Option<Address>>;
    fn save(&self, address: &Address) -> RepoResult<Address>;
    fn delete(&self, address: &Address) -> RepoResult<()>;
}

/// SQLite-backed address repository.
pub struct SqliteAddressRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAddressRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["addresses"])?;
        Ok(Self { conn })
    }
}

impl AddressRepository for SqliteAddressRepository<'_> {
    fn insert(&self, member_id: MemberId, address: &NewAddress) -> RepoResult<Address> {
        self.conn.execute(
            "INSERT INTO addresses (member_id, street, detail, zipcode)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                member_id,
                address.street(),
                address.detail(),
                address.zipcode()
            ],
        )?;

        Ok(Address::from_parts(
            self.conn.last_insert_rowid(),
            member_id,
            address.street().to_string(),
            address.detail().to_string(),
            address.zipcode().to_string(),
        ))
    }

    fn find_by_id(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let address = self
            .conn
            .query_row(
                &format!("{ADDRESS_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_address_row,
            )
            .optional()?;
        Ok(address)
    }

    fn find_by_member_id(&self, member_id: MemberId) -> RepoResult<Option<Address>> {
        let address = self
            .conn
            .query_row(
                &format!("{ADDRESS_SELECT_SQL} WHERE member_id = ?1;"),
                [member_id],
                parse_address_row,
            )
            .optional()?;
        Ok(address)
    }

    fn save(&self, address: &Address) -> RepoResult<Address> {
        let changed = self.conn.execute(
            "UPDATE addresses
             SET street = ?1, detail = ?2, zipcode = ?3
             WHERE id = ?4;",
            params![
                address.street(),
                address.detail(),
                address.zipcode(),
                address.id()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "address",
                id: address.id(),
            });
        }

        Ok(address.clone())
    }

    fn delete(&self, address: &Address) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM addresses WHERE id = ?1;", [address.id()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "address",
                id: address.id(),
            });
        }

        Ok(())
    }
}

fn parse_address_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address::from_parts(
        row.get("id")?,
        row.get("member_id")?,
        row.get("street")?,
        row.get("detail")?,
        row.get("zipcode")?,
    ))
}
