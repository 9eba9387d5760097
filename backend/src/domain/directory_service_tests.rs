//! Tests for the contact directory service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockAddressRepository, MockContactRepository, MockUserRepository};
use crate::domain::{ErrorCode, User, UserId};
use rstest::{fixture, rstest};

const TOKEN: Option<&str> = Some("test");

type Service = DirectoryService<MockUserRepository, MockContactRepository, MockAddressRepository>;

#[fixture]
fn user() -> User {
    User::new(UserId::random(), "test", "test", "hash")
}

fn signed_in(user: &User) -> MockUserRepository {
    let user = user.clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_token()
        .return_once(move |_| Ok(Some(user)));
    users
}

fn make_service(
    users: MockUserRepository,
    contacts: MockContactRepository,
    addresses: MockAddressRepository,
) -> Service {
    DirectoryService::new(Arc::new(users), Arc::new(contacts), Arc::new(addresses))
}

fn contact_payload() -> ContactPayload {
    ContactPayload {
        first_name: Some("test".to_owned()),
        last_name: Some("test".to_owned()),
        email: Some("test@pzn.com".to_owned()),
        phone: Some("0988099090".to_owned()),
    }
}

fn address_payload() -> AddressPayload {
    AddressPayload {
        street: Some("Jalan Apa".to_owned()),
        city: Some("Kota Apa".to_owned()),
        province: Some("Provinsi Apa".to_owned()),
        country: Some("Indonesia".to_owned()),
        postal_code: Some("234234".to_owned()),
    }
}

fn stored_contact(id: i64) -> Contact {
    Contact::from_draft(
        ContactId::new(id),
        ContactDraft::validate(contact_payload()).expect("valid payload"),
    )
}

fn stored_address(id: i64) -> Address {
    Address::from_draft(
        AddressId::new(id),
        AddressDraft::validate(address_payload()).expect("valid payload"),
    )
}

#[rstest]
#[tokio::test]
async fn create_contact_requires_a_credential() {
    let mut contacts = MockContactRepository::new();
    contacts.expect_insert().never();
    let service = make_service(MockUserRepository::new(), contacts, MockAddressRepository::new());

    let err = service
        .create_contact(None, contact_payload())
        .await
        .expect_err("unauthorized");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn create_contact_rejects_invalid_payload_before_storage(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts.expect_insert().never();
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let err = service
        .create_contact(
            TOKEN,
            ContactPayload {
                first_name: Some(String::new()),
                email: Some("salah".to_owned()),
                ..ContactPayload::default()
            },
        )
        .await
        .expect_err("invalid payload");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let violations = err
        .details()
        .and_then(|d| d["violations"].as_array())
        .expect("violations");
    assert_eq!(violations.len(), 2);
}

#[rstest]
#[tokio::test]
async fn create_contact_stores_under_the_caller(user: User) {
    let owner = user.id();
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_insert()
        .withf(move |o, draft| *o == owner && draft.first_name == "test")
        .times(1)
        .return_once(|_, draft| Ok(Contact::from_draft(ContactId::new(1), draft.clone())));
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let contact = service
        .create_contact(TOKEN, contact_payload())
        .await
        .expect("created");
    assert_eq!(contact, stored_contact(1));
}

#[rstest]
#[tokio::test]
async fn update_contact_of_another_user_is_not_found(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts.expect_find_owned().return_once(|_, _| Ok(None));
    contacts.expect_update_owned().never();
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let err = service
        .update_contact(TOKEN, ContactId::new(2), contact_payload())
        .await
        .expect_err("not owned");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_contact_with_unchanged_fields_is_idempotent(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(4))));
    contacts
        .expect_update_owned()
        .times(1)
        .return_once(|_, id, draft| Ok(Some(Contact::from_draft(id, draft.clone()))));
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let updated = service
        .update_contact(TOKEN, ContactId::new(4), contact_payload())
        .await
        .expect("updated");
    assert_eq!(updated, stored_contact(4));
}

#[rstest]
#[tokio::test]
async fn delete_contact_cascades_through_one_repository_call(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(3))));
    contacts
        .expect_delete_with_addresses()
        .withf(|_, id| id.get() == 3)
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut addresses = MockAddressRepository::new();
    addresses.expect_delete_in_contact().never();
    let service = make_service(signed_in(&user), contacts, addresses);

    service
        .delete_contact(TOKEN, ContactId::new(3))
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn list_contacts_clamps_page_and_scopes_to_owner(user: User) {
    let owner = user.id();
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_search()
        .withf(move |o, search, request| {
            *o == owner && search.name() == Some("test1") && request.page().get() == 1
        })
        .times(1)
        .return_once(|_, _, request| Ok(Page::new(vec![stored_contact(1)], request, 1)));
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let page = service
        .list_contacts(
            TOKEN,
            ContactQuery {
                page: Some(-1),
                name: Some("test1".to_owned()),
                ..ContactQuery::default()
            },
        )
        .await
        .expect("listed");
    assert_eq!(page.paging().total_item(), 1);
    assert_eq!(page.paging().total_page(), 1);
}

#[rstest]
#[tokio::test]
async fn create_address_under_unknown_contact_is_not_found(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts.expect_find_owned().return_once(|_, _| Ok(None));
    let mut addresses = MockAddressRepository::new();
    addresses.expect_insert().never();
    let service = make_service(signed_in(&user), contacts, addresses);

    let err = service
        .create_address(TOKEN, ContactId::new(2), address_payload())
        .await
        .expect_err("unknown contact");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_address_after_concurrent_contact_delete_is_not_found(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(1))));
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_insert()
        .withf(|contact, _| contact.get() == 1)
        .times(1)
        .return_once(|_, _| Ok(None));
    let service = make_service(signed_in(&user), contacts, addresses);

    let err = service
        .create_address(TOKEN, ContactId::new(1), address_payload())
        .await
        .expect_err("contact vanished");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "contact is not found");
}

#[rstest]
#[tokio::test]
async fn create_address_stores_under_the_owned_contact(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(1))));
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_insert()
        .withf(|contact, draft| contact.get() == 1 && draft.country == "Indonesia")
        .times(1)
        .return_once(|_, draft| Ok(Some(Address::from_draft(AddressId::new(3), draft.clone()))));
    let service = make_service(signed_in(&user), contacts, addresses);

    let address = service
        .create_address(TOKEN, ContactId::new(1), address_payload())
        .await
        .expect("created");
    assert_eq!(address, stored_address(3));
}

#[rstest]
#[tokio::test]
async fn update_address_validates_before_checking_ownership(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts.expect_find_owned().never();
    let service = make_service(signed_in(&user), contacts, MockAddressRepository::new());

    let err = service
        .update_address(
            TOKEN,
            ContactId::new(1),
            AddressId::new(1),
            AddressPayload::default(),
        )
        .await
        .expect_err("invalid payload");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn get_address_checks_both_links(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(1))));
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_in_contact()
        .withf(|contact, id| contact.get() == 1 && id.get() == 7)
        .return_once(|_, _| Ok(Some(stored_address(7))));
    let service = make_service(signed_in(&user), contacts, addresses);

    let address = service
        .get_address(TOKEN, ContactId::new(1), AddressId::new(7))
        .await
        .expect("found");
    assert_eq!(address, stored_address(7));
}

#[rstest]
#[tokio::test]
async fn delete_address_reports_a_vanished_row(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(1))));
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_in_contact()
        .return_once(|_, _| Ok(Some(stored_address(2))));
    addresses
        .expect_delete_in_contact()
        .return_once(|_, _| Ok(false));
    let service = make_service(signed_in(&user), contacts, addresses);

    let err = service
        .delete_address(TOKEN, ContactId::new(1), AddressId::new(2))
        .await
        .expect_err("raced delete");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_addresses_returns_rows_for_owned_contact(user: User) {
    let mut contacts = MockContactRepository::new();
    contacts
        .expect_find_owned()
        .return_once(|_, _| Ok(Some(stored_contact(1))));
    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_list_for_contact()
        .return_once(|_| Ok(vec![stored_address(1), stored_address(2)]));
    let service = make_service(signed_in(&user), contacts, addresses);

    let listed = service
        .list_addresses(TOKEN, ContactId::new(1))
        .await
        .expect("listed");
    assert_eq!(listed.len(), 2);
}
