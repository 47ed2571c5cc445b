//! Mock client behavior: fixture defaults, stub layering, merge semantics,
//! and the raise-or-return policy.

use lastmile_core::{
    fixtures, ApiErrorKind, CallArgs, Client, ClientError, Config, MockClient, Operation, Outcome,
};
use serde_json::{json, Value};

fn args() -> CallArgs {
    CallArgs::new().with_session("session-token")
}

#[test]
fn returns_the_default_fixture_for_every_operation() {
    let client = MockClient::new().with_raise_api_errors(false);
    for operation in Operation::ALL {
        let fixture = fixtures::load_default(operation, Outcome::Success).unwrap();
        let response = client.call(operation, &args()).unwrap();
        assert!(response.is_success(), "{operation} should classify as success");

        match &fixture {
            Value::Array(items) => {
                let collection = response.payload().collection().unwrap();
                assert_eq!(collection.len(), items.len(), "{operation} collection size");
                for (entry, expected) in collection.iter().zip(items) {
                    assert_eq!(entry.as_value(), expected, "{operation} collection entry");
                }
            }
            other => assert_eq!(response.payload().as_value(), other, "{operation} payload"),
        }
    }
}

#[test]
fn later_stubs_for_the_same_operation_replace_earlier_ones() {
    let fixture_text =
        std::fs::read_to_string(fixtures::find_path(Operation::CreateOrder, Outcome::Success))
            .unwrap();
    let client = MockClient::new()
        .stub([(Operation::CreateOrder, fixture_text.clone())])
        .unwrap()
        .stub([(Operation::GetOrder, json!({"orderExternalId": "ORD-444"}))])
        .unwrap()
        .stub([(Operation::GetOrder, json!({"orderExternalId": "ORD-555"}))])
        .unwrap();

    let keys: Vec<Operation> = client.stubs().keys().copied().collect();
    assert_eq!(keys, vec![Operation::CreateOrder, Operation::GetOrder]);

    let response = client.call(Operation::GetOrder, &args()).unwrap();
    assert_eq!(
        response.payload().get("orderExternalId").unwrap().as_str(),
        Some("ORD-555")
    );

    let expected: Value = serde_json::from_str(&fixture_text).unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();
    assert_eq!(response.payload().as_value(), &expected);
}

#[test]
fn partial_stubs_inherit_the_rest_of_the_fixture() {
    let client = MockClient::new()
        .stub([(Operation::CreateOrder, json!({"storeExternalId": "7709"}))])
        .unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();
    let payload = response.payload();

    assert_eq!(payload.get("storeExternalId").unwrap().as_str(), Some("7709"));
    assert_eq!(
        payload.get("deliveryContact").unwrap().get("phone").unwrap().as_str(),
        Some("+1 234-567-8900")
    );
    assert_eq!(
        payload.get("deliveryAddress").unwrap().get("street").unwrap().as_str(),
        Some("725 Albany Street")
    );
    assert_eq!(
        payload.get("pickUpAddress").unwrap().get("street").unwrap().as_str(),
        Some("345 Harrison Avenue")
    );
}

#[test]
fn nested_stub_fields_combine_with_the_fixture_subtree() {
    let client = MockClient::new()
        .stub([(
            Operation::CreateOrder,
            json!({"deliveryContact": {"phone": "+1 555-000-1111"}}),
        )])
        .unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();
    let contact = response.payload().get("deliveryContact").unwrap();

    assert_eq!(contact.get("phone").unwrap().as_str(), Some("+1 555-000-1111"));
    assert_eq!(contact.get("name").unwrap().as_str(), Some("Jane Doe"));
}

#[test]
fn text_stubs_parse_before_merging() {
    let client = MockClient::new()
        .stub([(Operation::CreateOrder, r#"{"storeExternalId": "7709"}"#)])
        .unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();
    assert_eq!(
        response.payload().get("storeExternalId").unwrap().as_str(),
        Some("7709")
    );
}

#[test]
fn bare_array_stubs_normalize_to_a_collection() {
    let client = MockClient::new()
        .stub([(Operation::ListLocations, json!([{"name": "Stubbed Store"}]))])
        .unwrap()
        .stub([(
            Operation::GetAlternateLocations,
            json!([{"provider": "Stubbed Provider"}]),
        )])
        .unwrap();

    let keys: Vec<Operation> = client.stubs().keys().copied().collect();
    assert_eq!(
        keys,
        vec![Operation::GetAlternateLocations, Operation::ListLocations]
    );

    let response = client.call(Operation::ListLocations, &args()).unwrap();
    let first = &response.payload().collection().unwrap()[0];
    assert_eq!(first.get("name").unwrap().as_str(), Some("Stubbed Store"));

    let response = client.call(Operation::GetAlternateLocations, &args()).unwrap();
    let first = &response.payload().collection().unwrap()[0];
    assert_eq!(first.get("provider").unwrap().as_str(), Some("Stubbed Provider"));
}

#[test]
fn invalid_outcome_values_are_rejected_by_name() {
    let err = "invalid_status".parse::<Outcome>().unwrap_err();
    assert!(matches!(err, ClientError::InvalidOutcome(ref value) if value == "invalid_status"));
}

#[test]
fn failure_stubs_classify_as_errors_without_raising() {
    let client = MockClient::new()
        .with_raise_api_errors(false)
        .stub_with(Outcome::Failure, [(Operation::CreateOrder, json!({}))])
        .unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status(), 400);
}

#[test]
fn error_payloads_raise_the_mapped_typed_error() {
    let client = MockClient::new()
        .stub_with(Outcome::Failure, [(Operation::CreateOrder, json!({}))])
        .unwrap();
    let err = client.call(Operation::CreateOrder, &args()).unwrap_err();

    match err {
        ClientError::Api { kind, message } => {
            assert_eq!(kind, ApiErrorKind::InvalidData);
            assert_eq!(message, "storeExternalId is required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn error_stubs_return_an_envelope_when_raising_is_disabled() {
    let fixture_text =
        std::fs::read_to_string(fixtures::find_path(Operation::CreateOrder, Outcome::Failure))
            .unwrap();
    let client = MockClient::new()
        .with_raise_api_errors(false)
        .stub([(Operation::CreateOrder, fixture_text)])
        .unwrap();
    let response = client.call(Operation::CreateOrder, &args()).unwrap();

    assert!(response.is_error());
    assert_eq!(response.status(), 400);
    assert_eq!(response.payload().get("type").unwrap().as_str(), Some("invalid_data"));
    assert_eq!(
        response.payload().get("message").unwrap().as_str(),
        Some("storeExternalId is required")
    );
    // Deep merge still applies: the untouched success-fixture fields stay.
    assert_eq!(
        response.payload().get("storeExternalId").unwrap().as_str(),
        Some("1362")
    );
}

#[test]
fn calls_without_a_session_are_rejected() {
    let client = MockClient::new();
    let err = client.call(Operation::GetOrder, &CallArgs::new()).unwrap_err();
    assert!(matches!(err, ClientError::SessionMissing));
}

#[test]
fn unknown_operation_names_have_no_stub() {
    let client = MockClient::new();
    let err = client.call_named("unavailable_request", &args()).unwrap_err();
    assert!(matches!(err, ClientError::NoStub(ref name) if name == "unavailable_request"));

    // The session check only applies to recognized operations; an unknown
    // name fails the same way with or without a session.
    let err = client.call_named("unavailable_request", &CallArgs::new()).unwrap_err();
    assert!(matches!(err, ClientError::NoStub(_)));
}

#[test]
fn create_and_cancel_echo_the_caller_order_id() {
    let client = MockClient::new();

    let response = client
        .call(Operation::CreateOrder, &args().with_order_external_id("abc"))
        .unwrap();
    assert_eq!(response.payload().get("orderExternalId").unwrap().as_str(), Some("abc"));

    let response = client
        .call(Operation::CancelOrder, &args().with_order_external_id("abc"))
        .unwrap();
    assert_eq!(response.payload().get("orderExternalId").unwrap().as_str(), Some("abc"));

    // The echo overrides stubs too.
    let stubbed = MockClient::new()
        .stub([(Operation::CreateOrder, json!({"orderExternalId": "ORD-444"}))])
        .unwrap();
    let response = stubbed
        .call(Operation::CreateOrder, &args().with_order_external_id("abc"))
        .unwrap();
    assert_eq!(response.payload().get("orderExternalId").unwrap().as_str(), Some("abc"));
}

#[test]
fn every_shipped_failure_fixture_maps_to_an_error_kind() {
    for operation in Operation::ALL {
        let fixture = fixtures::load_default(operation, Outcome::Failure).unwrap();
        let declared = fixture
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("{operation} failure fixture lacks a type"));
        assert!(
            ApiErrorKind::from_type(declared).is_some(),
            "unmapped error type '{declared}' in {operation} failure fixture"
        );
        assert!(
            fixture.get("statusCode").and_then(Value::as_u64).is_some(),
            "{operation} failure fixture lacks a statusCode"
        );
        assert!(
            fixture.get("message").and_then(Value::as_str).is_some(),
            "{operation} failure fixture lacks a message"
        );
    }
}

#[test]
fn the_client_facade_dispatches_named_methods_to_the_mock() {
    let mock = MockClient::new()
        .stub([(Operation::GetOrder, json!({"orderExternalId": "ORD-555"}))])
        .unwrap();
    let client = Client::from(mock);

    let response = client.get_order(&args()).unwrap();
    assert_eq!(response.payload().get("orderExternalId").unwrap().as_str(), Some("ORD-555"));

    let response = client.list_locations(&args()).unwrap();
    assert!(!response.payload().collection().unwrap().is_empty());
}

#[test]
fn build_applies_the_configured_default_outcome() {
    let client = Client::build(Config {
        test: true,
        raise_api_errors: false,
        default_outcome: Outcome::Failure,
        ..Config::default()
    })
    .unwrap();

    let response = client.create_order(&args()).unwrap();
    assert!(response.is_error());
    assert_eq!(response.status(), 400);
}
