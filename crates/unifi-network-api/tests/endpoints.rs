// crates/unifi-network-api/tests/endpoints.rs
// ============================================================================
// Test Module: Endpoint Surface
// Coverage: Paths, filter compilation, action bodies, bound checks, and
//           response decoding per endpoint.
// ============================================================================
//! ## Overview
//! Integration tests for the site-scoped API surface, driven through a
//! scripted transport so every outgoing request can be inspected.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::ensure;
use support::fail;
use support::mocks::ScriptedTransport;
use support::mocks::empty_response;
use support::mocks::json_response;
use support::mocks::single_page;
use unifi_network_api::AuthorizeGuestRequest;
use unifi_network_api::DeviceSearch;
use unifi_network_api::DeviceState;
use unifi_network_api::ListOptions;
use unifi_network_api::NetworkApi;
use unifi_network_api::VoucherSpec;
use unifi_network_core::ApiClientError;
use unifi_network_core::Executor;
use unifi_network_core::Method;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds a device list entry.
fn device_json(name: &str, model: &str, state: &str) -> Value {
    json!({
        "id": format!("dev-{name}"),
        "name": name,
        "model": model,
        "macAddress": "aa:bb:cc:dd:ee:ff",
        "ipAddress": "192.168.1.10",
        "state": state,
    })
}

/// Builds a created-voucher entry.
fn voucher_json() -> Value {
    json!({
        "id": "v-1",
        "createdAt": "2024-01-15T10:30:00Z",
        "name": "conference",
        "code": 4_861_327_901u64,
        "authorizedGuestLimit": 1,
        "authorizedGuestCount": 0,
        "expired": false,
        "timeLimitMinutes": 480,
    })
}

/// Returns the value of a query parameter on a recorded request.
fn query_param(request: &unifi_network_core::ApiRequest, key: &str) -> Option<String> {
    request
        .query
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

// ============================================================================
// SECTION: Application and Sites
// ============================================================================

/// Tests application info hits `/info` and decodes the version.
#[test]
fn application_info_hits_info() -> TestResult {
    let transport =
        ScriptedTransport::new(vec![json_response(200, &json!({"applicationVersion": "9.0.114"}))]);
    let api = NetworkApi::new(Executor::new(&transport));

    let info = api.application_info()?;
    ensure(info.application_version == "9.0.114", "expected decoded version")?;

    let requests = transport.requests();
    ensure(requests[0].method == Method::Get, "expected GET")?;
    ensure(requests[0].path == "/info", "expected /info path")?;
    Ok(())
}

/// Tests the site listing decodes through the pagination envelope.
#[test]
fn lists_sites() -> TestResult {
    let transport = ScriptedTransport::new(vec![json_response(
        200,
        &single_page(&[json!({"id": "s-1", "name": "Main Office"})]),
    )]);
    let api = NetworkApi::new(Executor::new(&transport));

    let sites = api.list_sites(&ListOptions::new())?;
    ensure(sites.len() == 1, "expected one site")?;
    ensure(sites[0].id == "s-1", "expected site id")?;
    ensure(sites[0].name == "Main Office", "expected site name")?;
    ensure(sites[0].internal_reference.is_none(), "expected absent reference as None")?;
    ensure(transport.requests()[0].path == "/sites", "expected /sites path")?;
    Ok(())
}

// ============================================================================
// SECTION: Filter Compilation
// ============================================================================

/// Tests list filters compile to canonical form in the query string.
#[test]
fn compiles_filter_into_query() -> TestResult {
    let transport = ScriptedTransport::new(vec![json_response(200, &single_page(&[]))]);
    let api = NetworkApi::new(Executor::new(&transport));

    let options = ListOptions::new()
        .with_filter("and( state.eq('ONLINE') , name.like('AP*') )")
        .with_limit(50);
    let devices = api.list_devices("s-1", &options)?;
    ensure(devices.is_empty(), "expected empty listing")?;

    let request = &transport.requests()[0];
    ensure(request.path == "/sites/s-1/devices", "expected devices path")?;
    ensure(
        query_param(request, "filter").as_deref()
            == Some("and(state.eq('ONLINE'),name.like('AP*'))"),
        "expected the canonical filter string",
    )?;
    ensure(query_param(request, "limit").as_deref() == Some("50"), "expected explicit limit")?;
    ensure(query_param(request, "offset").as_deref() == Some("0"), "expected zero offset")?;
    Ok(())
}

/// Tests a filter that violates the schema never reaches the network.
#[test]
fn rejects_invalid_filter_before_send() -> TestResult {
    let transport = ScriptedTransport::new(vec![]);
    let api = NetworkApi::new(Executor::new(&transport));

    let options = ListOptions::new().with_filter("bogus.eq('x')");
    match api.list_devices("s-1", &options) {
        Err(ApiClientError::Validation(_)) => {}
        other => return fail(format!("expected Validation, got {other:?}")),
    }
    ensure(transport.sent() == 0, "expected no network traffic")?;
    Ok(())
}

/// Tests page limits follow each endpoint's own bounds.
#[test]
fn applies_per_endpoint_page_bounds() -> TestResult {
    let transport = ScriptedTransport::new(vec![]);
    let api = NetworkApi::new(Executor::new(&transport));

    // 500 is over the standard cap but inside the voucher cap.
    let options = ListOptions::new().with_limit(500);
    match api.devices_query("s-1", &options) {
        Err(ApiClientError::InvalidRequest {
            ..
        }) => {}
        other => return fail(format!("expected device limit rejection, got {other:?}")),
    }
    ensure(api.vouchers_query("s-1", &options).is_ok(), "expected voucher cap of 1000")?;
    Ok(())
}

// ============================================================================
// SECTION: Device Actions
// ============================================================================

/// Tests restart posts the action body to the device's action endpoint.
#[test]
fn restart_posts_action_body() -> TestResult {
    let transport = ScriptedTransport::new(vec![empty_response(200)]);
    let api = NetworkApi::new(Executor::new(&transport));

    api.restart_device("s-1", "d-1")?;
    let request = &transport.requests()[0];
    ensure(request.method == Method::Post, "expected POST")?;
    ensure(request.path == "/sites/s-1/devices/d-1/actions", "expected action path")?;
    ensure(request.body == Some(json!({"action": "RESTART"})), "expected restart body")?;
    Ok(())
}

/// Tests port power-cycle targets the port's action endpoint.
#[test]
fn power_cycle_targets_port() -> TestResult {
    let transport = ScriptedTransport::new(vec![empty_response(200)]);
    let api = NetworkApi::new(Executor::new(&transport));

    api.power_cycle_port("s-1", "d-1", 8)?;
    let request = &transport.requests()[0];
    ensure(
        request.path == "/sites/s-1/devices/d-1/interfaces/ports/8/actions",
        "expected port action path",
    )?;
    ensure(request.body == Some(json!({"action": "POWER_CYCLE"})), "expected power-cycle body")?;
    Ok(())
}

// ============================================================================
// SECTION: Guest Actions
// ============================================================================

/// Tests guest authorization serializes limits with wire field names.
#[test]
fn authorize_guest_serializes_limits() -> TestResult {
    let transport = ScriptedTransport::new(vec![empty_response(200)]);
    let api = NetworkApi::new(Executor::new(&transport));

    let request = AuthorizeGuestRequest::with_limits(Some(480), Some(1024), Some(2000), None)?;
    api.authorize_guest("s-1", "c-1", &request)?;

    let sent = &transport.requests()[0];
    ensure(sent.path == "/sites/s-1/clients/c-1/actions", "expected client action path")?;
    ensure(
        sent.body
            == Some(json!({
                "action": "AUTHORIZE_GUEST_ACCESS",
                "timeLimitMinutes": 480,
                "dataUsageLimitMBytes": 1024,
                "rxRateLimitKbps": 2000,
            })),
        "expected limits under wire names with absent fields omitted",
    )?;
    Ok(())
}

/// Tests out-of-range guest limits fail before any network call.
#[test]
fn rejects_out_of_range_guest_limits() -> TestResult {
    let cases = [
        AuthorizeGuestRequest::with_limits(Some(0), None, None, None),
        AuthorizeGuestRequest::with_limits(Some(1_000_001), None, None, None),
        AuthorizeGuestRequest::with_limits(None, Some(1_048_577), None, None),
        AuthorizeGuestRequest::with_limits(None, None, Some(1), None),
        AuthorizeGuestRequest::with_limits(None, None, None, Some(100_001)),
    ];
    for case in cases {
        match case {
            Err(ApiClientError::InvalidRequest {
                ..
            }) => {}
            other => return fail(format!("expected InvalidRequest, got {other:?}")),
        }
    }
    Ok(())
}

/// Tests deauthorization posts its discriminator.
#[test]
fn unauthorize_guest_posts_action() -> TestResult {
    let transport = ScriptedTransport::new(vec![empty_response(200)]);
    let api = NetworkApi::new(Executor::new(&transport));

    api.unauthorize_guest("s-1", "c-1")?;
    ensure(
        transport.requests()[0].body == Some(json!({"action": "UNAUTHORIZE_GUEST_ACCESS"})),
        "expected deauthorization body",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Vouchers
// ============================================================================

/// Tests voucher creation sends the built body and decodes the response.
#[test]
fn create_vouchers_round_trip() -> TestResult {
    let transport =
        ScriptedTransport::new(vec![json_response(200, &json!({"vouchers": [voucher_json()]}))]);
    let api = NetworkApi::new(Executor::new(&transport));

    let spec = VoucherSpec::new("conference", 480).count(1).data_usage_limit_mbytes(2048);
    let created = api.create_vouchers("s-1", spec)?;
    ensure(created.vouchers.len() == 1, "expected one voucher back")?;
    ensure(created.vouchers[0].code == 4_861_327_901, "expected numeric code")?;

    let request = &transport.requests()[0];
    ensure(request.path == "/sites/s-1/hotspot/vouchers", "expected voucher path")?;
    ensure(
        request.body
            == Some(json!({
                "count": 1,
                "name": "conference",
                "authorizedGuestLimit": 1,
                "timeLimitMinutes": 480,
                "dataUsageLimitMBytes": 2048,
            })),
        "expected built body with omitted rate caps",
    )?;
    Ok(())
}

/// Tests a server error on voucher creation surfaces once, unretried.
#[test]
fn create_vouchers_never_retries_server_errors() -> TestResult {
    let transport = ScriptedTransport::new(vec![json_response(
        503,
        &json!({"statusCode": 503, "statusName": "SERVICE_UNAVAILABLE", "message": "upstream down"}),
    )]);
    let api = NetworkApi::new(Executor::new(&transport));

    let spec = VoucherSpec::new("conference", 480);
    match api.create_vouchers("s-1", spec) {
        Err(ApiClientError::Server {
            status: 503, ..
        }) => {}
        other => return fail(format!("expected bare Server error, got {other:?}")),
    }
    ensure(transport.sent() == 1, "expected exactly one send")?;
    Ok(())
}

/// Tests voucher specs are bound-checked before any network call.
#[test]
fn rejects_out_of_bounds_voucher_specs() -> TestResult {
    let transport = ScriptedTransport::new(vec![]);
    let api = NetworkApi::new(Executor::new(&transport));

    let cases = [
        VoucherSpec::new("v", 0),
        VoucherSpec::new("v", 1_000_001),
        VoucherSpec::new("v", 60).count(0),
        VoucherSpec::new("v", 60).count(1_001),
        VoucherSpec::new("v", 60).authorized_guest_limit(0),
        VoucherSpec::new("v", 60).rx_rate_limit_kbps(1),
    ];
    for spec in cases {
        match api.create_vouchers("s-1", spec) {
            Err(ApiClientError::InvalidRequest {
                ..
            }) => {}
            other => return fail(format!("expected InvalidRequest, got {other:?}")),
        }
    }
    ensure(transport.sent() == 0, "expected no network traffic")?;
    Ok(())
}

/// Tests voucher deletion tolerates empty response bodies.
#[test]
fn delete_voucher_handles_both_body_shapes() -> TestResult {
    let transport = ScriptedTransport::new(vec![
        json_response(200, &json!({"vouchersDeleted": 1})),
        empty_response(200),
    ]);
    let api = NetworkApi::new(Executor::new(&transport));

    let counted = api.delete_voucher("s-1", "v-1")?;
    ensure(
        counted.map(|response| response.vouchers_deleted) == Some(1),
        "expected a deletion count",
    )?;

    let empty = api.delete_voucher("s-1", "v-2")?;
    ensure(empty.is_none(), "expected None for an empty body")?;
    ensure(
        transport.requests()[0].path == "/sites/s-1/hotspot/vouchers/v-1",
        "expected voucher id in the path",
    )?;
    ensure(transport.requests()[0].method == Method::Delete, "expected DELETE")?;
    Ok(())
}

// ============================================================================
// SECTION: Device Search
// ============================================================================

/// Tests search combines wildcard, model, and state criteria.
#[test]
fn search_filters_devices_client_side() -> TestResult {
    let transport = ScriptedTransport::new(vec![json_response(
        200,
        &single_page(&[
            device_json("AP-Lobby", "U6", "ONLINE"),
            device_json("AP-Cafe", "U6L", "OFFLINE"),
            device_json("Switch-1", "USW24", "ONLINE"),
        ]),
    )]);
    let api = NetworkApi::new(Executor::new(&transport));

    let search = DeviceSearch::new()
        .with_name_pattern("ap-*")
        .with_state(DeviceState::Online);
    let matched = api.search_devices("s-1", &search)?;
    ensure(matched.len() == 1, "expected a single match")?;
    ensure(matched[0].name == "AP-Lobby", "expected the online AP")?;
    Ok(())
}

/// Tests a malformed search pattern surfaces as an invalid request.
#[test]
fn search_rejects_malformed_pattern() -> TestResult {
    let transport = ScriptedTransport::new(vec![json_response(
        200,
        &single_page(&[device_json("AP-Lobby", "U6", "ONLINE")]),
    )]);
    let api = NetworkApi::new(Executor::new(&transport));

    let search = DeviceSearch::new().with_name_pattern("broken\\");
    match api.search_devices("s-1", &search) {
        Err(ApiClientError::InvalidRequest {
            message,
        }) => ensure(message.contains("name pattern"), "expected the pattern named"),
        other => fail(format!("expected InvalidRequest, got {other:?}")),
    }
}
