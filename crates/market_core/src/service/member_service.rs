//! Member use-case service.
//!
//! # Responsibility
//! - Profile reads, nickname/address updates and registration.
//! - The member deletion cascade.
//!
//! # Invariants
//! - Every write runs inside one unit of work; failures leave no trace.
//! - Validation runs after the target row is loaded and before any write.
//! - Deletion order is: authored comments, authored boards, address, member.
//! - Logs carry ids only, never profile or address text.

use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::member::{Member, MemberId, NewMember};
use crate::model::profile::{AddressDetail, AddressUpdate, MemberProfile, ProfileUpdate};
use crate::model::validation::ValidationError;
use crate::repo::address_repo::AddressRepository;
use crate::repo::member_repo::MemberRepository;
use crate::repo::{RepoError, UnitOfWork};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MemberServiceResult<T> = Result<T, MemberServiceError>;

/// How a missing address was looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKey {
    /// By the address's own id.
    Id(AddressId),
    /// By the owning member's id.
    Owner(MemberId),
}

impl Display for AddressKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Owner(member_id) => write!(f, "member {member_id}"),
        }
    }
}

/// Service error for member use-cases.
#[derive(Debug)]
pub enum MemberServiceError {
    /// No member row for the requested id.
    MemberNotFound(MemberId),
    /// No address row for the requested key.
    AddressNotFound(AddressKey),
    /// A required field is missing or blank. Carries the user-facing message.
    InvalidInput(String),
    /// Registration with an email that already belongs to a member.
    DuplicateEmail,
    /// Member already owns an address.
    AddressAlreadyAttached(MemberId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MemberServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::AddressNotFound(key) => write!(f, "address not found: {key}"),
            Self::InvalidInput(message) => f.write_str(message),
            Self::DuplicateEmail => f.write_str("이미 사용 중인 이메일입니다."),
            Self::AddressAlreadyAttached(id) => {
                write!(f, "member {id} already has an address")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemberServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemberServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for MemberServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value.message().to_string())
    }
}

/// Member service facade over member/address repositories.
pub struct MemberService<M, A, U>
where
    M: MemberRepository,
    A: AddressRepository,
    U: UnitOfWork,
{
    members: M,
    addresses: A,
    uow: U,
}

impl<M, A, U> MemberService<M, A, U>
where
    M: MemberRepository,
    A: AddressRepository,
    U: UnitOfWork,
{
    pub fn new(members: M, addresses: A, uow: U) -> Self {
        Self {
            members,
            addresses,
            uow,
        }
    }

    /// Stores a new member. Emails are unique, compared case-insensitively.
    pub fn register_member(&self, new_member: &NewMember) -> MemberServiceResult<Member> {
        self.uow.atomically(|| -> MemberServiceResult<_> {
            if self.members.find_by_email(new_member.email())?.is_some() {
                return Err(MemberServiceError::DuplicateEmail);
            }
            let member = self.members.insert(new_member)?;
            info!(
                "event=member_register module=service status=ok member_id={}",
                member.id()
            );
            Ok(member)
        })
    }

    /// Creates the member's address.
    ///
    /// # Errors
    /// - `MemberNotFound` for an unknown member.
    /// - `InvalidInput` for the first blank field (street, detail, zipcode).
    /// - `AddressAlreadyAttached` when the member already owns one.
    pub fn attach_address(
        &self,
        member_id: MemberId,
        update: &AddressUpdate,
    ) -> MemberServiceResult<Address> {
        self.uow.atomically(|| -> MemberServiceResult<_> {
            let member = self.load_member(member_id)?;
            let new_address = NewAddress::from_update(update)?;
            if self.addresses.find_by_member_id(member.id())?.is_some() {
                return Err(MemberServiceError::AddressAlreadyAttached(member.id()));
            }
            let address = self.addresses.insert(member.id(), &new_address)?;
            info!(
                "event=address_attach module=service status=ok member_id={} address_id={}",
                member.id(),
                address.id()
            );
            Ok(address)
        })
    }

    /// Public profile lookup. The member must have an address.
    pub fn get_member(&self, id: MemberId) -> MemberServiceResult<MemberProfile> {
        let member = self.load_member(id)?;
        let address = self
            .addresses
            .find_by_member_id(member.id())?
            .ok_or(MemberServiceError::AddressNotFound(AddressKey::Owner(
                member.id(),
            )))?;
        Ok(to_profile(&member, Some(&address)))
    }

    /// Self-profile lookup. A missing address yields `address: None`.
    pub fn get_my_info(&self, id: MemberId) -> MemberServiceResult<MemberProfile> {
        let member = self.load_member(id)?;
        let address = self.addresses.find_by_member_id(member.id())?;
        Ok(to_profile(&member, address.as_ref()))
    }

    /// Replaces the nickname and returns the refreshed profile.
    ///
    /// Persists exactly once on success and never on validation failure.
    pub fn update_member(
        &self,
        update: &ProfileUpdate,
        id: MemberId,
    ) -> MemberServiceResult<MemberProfile> {
        self.uow.atomically(|| -> MemberServiceResult<_> {
            let mut member = self.load_member(id)?;
            member.change_nickname(update.nickname.as_deref())?;
            let member = self.members.save(&member)?;
            let address = self.addresses.find_by_member_id(member.id())?;
            info!(
                "event=member_update module=service status=ok member_id={}",
                member.id()
            );
            Ok(to_profile(&member, address.as_ref()))
        })
    }

    /// Overwrites an address, looked up by its own id.
    pub fn update_address(
        &self,
        update: &AddressUpdate,
        id: AddressId,
    ) -> MemberServiceResult<AddressDetail> {
        self.uow.atomically(|| -> MemberServiceResult<_> {
            let mut address = self
                .addresses
                .find_by_id(id)?
                .ok_or(MemberServiceError::AddressNotFound(AddressKey::Id(id)))?;
            address.update(update)?;
            let address = self.addresses.save(&address)?;
            info!(
                "event=address_update module=service status=ok address_id={} member_id={}",
                address.id(),
                address.member_id()
            );
            Ok(address.to_detail())
        })
    }

    /// Deletes the member aggregate.
    ///
    /// Comments on the member's boards written by other members go with
    /// the boards. Returns `true` once all steps have committed.
    pub fn delete_member(&self, id: MemberId) -> MemberServiceResult<bool> {
        self.uow.atomically(|| -> MemberServiceResult<_> {
            let member = self.load_member(id)?;
            let comments_deleted = self.members.delete_comments_by_member_id(member.id())?;
            let boards_deleted = self.members.delete_boards_by_member_id(member.id())?;
            let address = self.addresses.find_by_member_id(member.id())?;
            if let Some(address) = &address {
                self.addresses.delete(address)?;
            }
            self.members.delete(&member)?;
            info!(
                "event=member_delete module=service status=ok member_id={} comments_deleted={} boards_deleted={} address_deleted={}",
                member.id(),
                comments_deleted,
                boards_deleted,
                address.is_some()
            );
            Ok(true)
        })
    }

    fn load_member(&self, id: MemberId) -> MemberServiceResult<Member> {
        self.members
            .find_by_id(id)?
            .ok_or(MemberServiceError::MemberNotFound(id))
    }
}

fn to_profile(member: &Member, address: Option<&Address>) -> MemberProfile {
    MemberProfile {
        email: member.email().to_string(),
        nickname: member.nickname().to_string(),
        address: address.map(Address::to_detail),
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressKey, MemberService, MemberServiceError};
    use crate::model::address::{Address, AddressId, NewAddress};
    use crate::model::member::{Member, MemberId, NewMember};
    use crate::model::profile::{AddressDetail, AddressUpdate, ProfileUpdate};
    use crate::repo::address_repo::AddressRepository;
    use crate::repo::member_repo::MemberRepository;
    use crate::repo::{RepoError, RepoResult, UnitOfWork};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeStore {
        members: BTreeMap<MemberId, Member>,
        addresses: BTreeMap<AddressId, Address>,
        next_id: i64,
        calls: Vec<&'static str>,
    }

    impl FakeStore {
        fn next_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }
    }

    type Shared = Rc<RefCell<FakeStore>>;

    struct FakeMembers(Shared);
    struct FakeAddresses(Shared);
    struct FakeUnitOfWork(Shared);

    impl MemberRepository for FakeMembers {
        fn insert(&self, member: &NewMember) -> RepoResult<Member> {
            let mut store = self.0.borrow_mut();
            store.calls.push("member.insert");
            let id = store.next_id();
            let member = Member::from_parts(
                id,
                member.email().to_string(),
                member.password().to_string(),
                member.nickname().to_string(),
            );
            store.members.insert(id, member.clone());
            Ok(member)
        }

        fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
            Ok(self.0.borrow().members.get(&id).cloned())
        }

        fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
            Ok(self
                .0
                .borrow()
                .members
                .values()
                .find(|member| member.email().eq_ignore_ascii_case(email))
                .cloned())
        }

        fn save(&self, member: &Member) -> RepoResult<Member> {
            let mut store = self.0.borrow_mut();
            store.calls.push("member.save");
            store.members.insert(member.id(), member.clone());
            Ok(member.clone())
        }

        fn delete(&self, member: &Member) -> RepoResult<()> {
            let mut store = self.0.borrow_mut();
            store.calls.push("member.delete");
            store.members.remove(&member.id());
            Ok(())
        }

        fn delete_comments_by_member_id(&self, _id: MemberId) -> RepoResult<usize> {
            self.0
                .borrow_mut()
                .calls
                .push("member.delete_comments_by_member_id");
            Ok(1)
        }

        fn delete_boards_by_member_id(&self, _id: MemberId) -> RepoResult<usize> {
            self.0
                .borrow_mut()
                .calls
                .push("member.delete_boards_by_member_id");
            Ok(1)
        }
    }

    impl AddressRepository for FakeAddresses {
        fn insert(&self, member_id: MemberId, address: &NewAddress) -> RepoResult<Address> {
            let mut store = self.0.borrow_mut();
            store.calls.push("address.insert");
            let id = store.next_id();
            let address = Address::from_parts(
                id,
                member_id,
                address.street().to_string(),
                address.detail().to_string(),
                address.zipcode().to_string(),
            );
            store.addresses.insert(id, address.clone());
            Ok(address)
        }

        fn find_by_id(&self, id: AddressId) -> RepoResult<Option<Address>> {
            Ok(self.0.borrow().addresses.get(&id).cloned())
        }

        fn find_by_member_id(&self, member_id: MemberId) -> RepoResult<Option<Address>> {
            Ok(self
                .0
                .borrow()
                .addresses
                .values()
                .find(|address| address.member_id() == member_id)
                .cloned())
        }

        fn save(&self, address: &Address) -> RepoResult<Address> {
            let mut store = self.0.borrow_mut();
            store.calls.push("address.save");
            store.addresses.insert(address.id(), address.clone());
            Ok(address.clone())
        }

        fn delete(&self, address: &Address) -> RepoResult<()> {
            let mut store = self.0.borrow_mut();
            store.calls.push("address.delete");
            store.addresses.remove(&address.id());
            Ok(())
        }
    }

    impl UnitOfWork for FakeUnitOfWork {
        fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
        where
            F: FnOnce() -> Result<T, E>,
            E: From<RepoError>,
        {
            self.0.borrow_mut().calls.push("uow.begin");
            let result = work();
            let outcome = if result.is_ok() {
                "uow.commit"
            } else {
                "uow.rollback"
            };
            self.0.borrow_mut().calls.push(outcome);
            result
        }
    }

    type TestService = MemberService<FakeMembers, FakeAddresses, FakeUnitOfWork>;

    struct Fixture {
        store: Shared,
        service: TestService,
        member_id: MemberId,
        address_id: AddressId,
    }

    impl Fixture {
        fn calls(&self) -> Vec<&'static str> {
            self.store.borrow().calls.clone()
        }

        fn clear_calls(&self) {
            self.store.borrow_mut().calls.clear();
        }
    }

    fn empty_service() -> (Shared, TestService) {
        let store: Shared = Rc::new(RefCell::new(FakeStore::default()));
        let service = MemberService::new(
            FakeMembers(Rc::clone(&store)),
            FakeAddresses(Rc::clone(&store)),
            FakeUnitOfWork(Rc::clone(&store)),
        );
        (store, service)
    }

    fn setup() -> Fixture {
        let (store, service) = empty_service();
        let new_member = Member::builder()
            .email("email@example.com")
            .nickname("nickname")
            .password("secret")
            .build()
            .unwrap();
        let member = service.register_member(&new_member).unwrap();
        let address = service
            .attach_address(member.id(), &AddressUpdate::new("street", "detail", "00000"))
            .unwrap();
        store.borrow_mut().calls.clear();

        Fixture {
            store,
            service,
            member_id: member.id(),
            address_id: address.id(),
        }
    }

    fn assert_invalid_input(err: MemberServiceError, expected: &str) {
        match err {
            MemberServiceError::InvalidInput(message) => assert_eq!(message, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn get_my_info_projects_member_and_owned_address() {
        let fixture = setup();

        let profile = fixture.service.get_my_info(fixture.member_id).unwrap();
        assert_eq!(profile.email, "email@example.com");
        assert_eq!(profile.nickname, "nickname");
        assert_eq!(
            profile.address,
            Some(AddressDetail {
                street: "street".to_string(),
                detail: "detail".to_string(),
                zipcode: "00000".to_string(),
            })
        );
    }

    #[test]
    fn get_member_uses_owned_address_even_when_ids_differ() {
        let fixture = setup();
        assert_ne!(fixture.member_id, fixture.address_id);

        let profile = fixture.service.get_member(fixture.member_id).unwrap();
        assert_eq!(profile.address.unwrap().zipcode, "00000");
        assert!(fixture.calls().is_empty());
    }

    #[test]
    fn get_member_without_address_is_address_not_found() {
        let (_store, service) = empty_service();
        let new_member = Member::builder()
            .email("solo@example.com")
            .nickname("solo")
            .password("secret")
            .build()
            .unwrap();
        let member = service.register_member(&new_member).unwrap();

        let err = service.get_member(member.id()).unwrap_err();
        assert!(matches!(
            err,
            MemberServiceError::AddressNotFound(AddressKey::Owner(id)) if id == member.id()
        ));

        let profile = service.get_my_info(member.id()).unwrap();
        assert!(profile.address.is_none());
    }

    #[test]
    fn unknown_member_fails_every_operation_without_writes() {
        let fixture = setup();
        let missing = 999;

        assert!(matches!(
            fixture.service.get_member(missing),
            Err(MemberServiceError::MemberNotFound(999))
        ));
        assert!(matches!(
            fixture.service.get_my_info(missing),
            Err(MemberServiceError::MemberNotFound(999))
        ));
        assert!(matches!(
            fixture
                .service
                .update_member(&ProfileUpdate::nickname("x"), missing),
            Err(MemberServiceError::MemberNotFound(999))
        ));
        assert!(matches!(
            fixture.service.delete_member(missing),
            Err(MemberServiceError::MemberNotFound(999))
        ));

        let writes: Vec<_> = fixture
            .calls()
            .into_iter()
            .filter(|call| !call.starts_with("uow."))
            .collect();
        assert!(writes.is_empty(), "unexpected writes: {writes:?}");
    }

    #[test]
    fn update_member_persists_once_and_returns_new_nickname() {
        let fixture = setup();

        let profile = fixture
            .service
            .update_member(&ProfileUpdate::nickname("newNickname"), fixture.member_id)
            .unwrap();

        assert_eq!(profile.nickname, "newNickname");
        assert_eq!(profile.email, "email@example.com");
        assert_eq!(profile.address.unwrap().street, "street");
        assert_eq!(
            fixture.calls(),
            vec!["uow.begin", "member.save", "uow.commit"]
        );
    }

    #[test]
    fn update_member_rejects_missing_or_blank_nickname() {
        let fixture = setup();

        for update in [ProfileUpdate::default(), ProfileUpdate::nickname("   ")] {
            let err = fixture
                .service
                .update_member(&update, fixture.member_id)
                .unwrap_err();
            assert_invalid_input(err, "닉네임을 입력해주세요.");
        }

        assert!(!fixture.calls().contains(&"member.save"));
        let profile = fixture.service.get_my_info(fixture.member_id).unwrap();
        assert_eq!(profile.nickname, "nickname");
    }

    #[test]
    fn update_address_reports_first_invalid_field_only() {
        let fixture = setup();
        let cases = [
            (AddressUpdate::new(" ", " ", " "), "주소를 입력해주세요."),
            (
                AddressUpdate {
                    street: None,
                    detail: Some("Detail".to_string()),
                    zipcode: Some("00000".to_string()),
                },
                "주소를 입력해주세요.",
            ),
            (AddressUpdate::new("Street", "   ", ""), "상세주소를 입력해주세요."),
            (
                AddressUpdate {
                    street: Some("Street".to_string()),
                    detail: Some("Detail".to_string()),
                    zipcode: None,
                },
                "우편번호를 입력해주세요.",
            ),
        ];

        for (update, expected) in cases {
            let err = fixture
                .service
                .update_address(&update, fixture.address_id)
                .unwrap_err();
            assert_invalid_input(err, expected);
        }

        assert!(!fixture.calls().contains(&"address.save"));
    }

    #[test]
    fn update_address_persists_and_returns_new_values() {
        let fixture = setup();

        let detail = fixture
            .service
            .update_address(
                &AddressUpdate::new("new Street", "new Detail", "11111"),
                fixture.address_id,
            )
            .unwrap();

        assert_eq!(detail.street, "new Street");
        assert_eq!(detail.detail, "new Detail");
        assert_eq!(detail.zipcode, "11111");
        assert_eq!(
            fixture.calls(),
            vec!["uow.begin", "address.save", "uow.commit"]
        );
    }

    #[test]
    fn update_address_unknown_id_is_address_not_found() {
        let fixture = setup();
        let err = fixture
            .service
            .update_address(&AddressUpdate::new("a", "b", "c"), 404)
            .unwrap_err();
        assert!(matches!(
            err,
            MemberServiceError::AddressNotFound(AddressKey::Id(404))
        ));
    }

    #[test]
    fn delete_member_runs_cascade_in_fixed_order() {
        let fixture = setup();

        assert!(fixture.service.delete_member(fixture.member_id).unwrap());
        assert_eq!(
            fixture.calls(),
            vec![
                "uow.begin",
                "member.delete_comments_by_member_id",
                "member.delete_boards_by_member_id",
                "address.delete",
                "member.delete",
                "uow.commit",
            ]
        );

        fixture.clear_calls();
        assert!(matches!(
            fixture.service.get_my_info(fixture.member_id),
            Err(MemberServiceError::MemberNotFound(_))
        ));
    }

    #[test]
    fn register_member_rejects_duplicate_email() {
        let fixture = setup();
        let duplicate = Member::builder()
            .email("EMAIL@example.com")
            .nickname("other")
            .password("secret")
            .build()
            .unwrap();

        let err = fixture.service.register_member(&duplicate).unwrap_err();
        assert!(matches!(err, MemberServiceError::DuplicateEmail));
        assert_eq!(fixture.calls(), vec!["uow.begin", "uow.rollback"]);
    }

    #[test]
    fn attach_address_refuses_second_address() {
        let fixture = setup();
        let err = fixture
            .service
            .attach_address(fixture.member_id, &AddressUpdate::new("a", "b", "c"))
            .unwrap_err();
        assert!(matches!(
            err,
            MemberServiceError::AddressAlreadyAttached(id) if id == fixture.member_id
        ));
    }

    #[test]
    fn validation_error_maps_to_invalid_input_message() {
        let err = MemberServiceError::from(
            crate::model::validation::ValidationError::BlankDetail,
        );
        assert_eq!(err.to_string(), "상세주소를 입력해주세요.");
    }
}
