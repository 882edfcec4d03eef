//! End-to-end API tests against an in-memory database.
//!
//! Each test builds its own router and drives it with `tower::ServiceExt`,
//! walking the case workflow the way a client would: register a case, add
//! accused, save and finalize memos, run the challan gate, download PDFs.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use casefile_api::{app, AppState};

async fn test_app() -> Router {
    let state = AppState::in_memory().await.expect("in-memory state");
    app(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get_raw(app: &Router, uri: &str) -> (StatusCode, Vec<(String, String)>, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

fn header_value<'a>(headers: &'a [(String, String)], name: &str) -> &'a str {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn case_payload(case_number: &str) -> Value {
    json!({
        "case_number": case_number,
        "railway_post": "RPF Post New Delhi",
        "law_section": "RP(UP) Act 1966 s.3",
        "fir_number": "17/2025",
        "incident_description": "Theft of overhead copper wire near km 182",
        "actor": "si.sharma"
    })
}

fn accused_payload(name: &str) -> Value {
    json!({
        "name": name,
        "parentage": "S/o Mohan Lal",
        "address": "Village Rampur, Dist. Ghaziabad",
        "age": 32,
        "gender": "male",
        "actor": "si.sharma"
    })
}

fn memo_fields(kind: &str) -> Value {
    match kind {
        "seizure" => json!({
            "kind": "seizure",
            "place_of_seizure": "Platform 2, NDLS",
            "seized_from": "the accused",
            "witnesses": ["Head Constable Yadav"],
            "items": [
                {"description": "Copper contact wire", "quantity": 6, "estimated_value": 5400.0},
                {"description": "Hacksaw blade", "quantity": 1, "estimated_value": 60.0}
            ]
        }),
        "arrest" => json!({
            "kind": "arrest",
            "place_of_arrest": "Platform 2, NDLS",
            "arrest_datetime": "2025-04-12 22:40",
            "arresting_officer": "SI Sharma",
            "grounds_summary": "Caught in possession of railway property"
        }),
        "personal_search" => json!({
            "kind": "personal_search",
            "place_of_search": "RPF Post New Delhi",
            "conducted_by": "SI Sharma",
            "witnesses": ["Constable Meena"],
            "items": [{"description": "Mobile phone", "quantity": 1}]
        }),
        "medical" => json!({
            "kind": "medical",
            "hospital": "Divisional Railway Hospital",
            "examined_by": "Dr. Rao",
            "examined_at": "2025-04-13 01:15",
            "injuries_noted": "None",
            "fit_for_custody": true
        }),
        "bnss_checklist" => json!({
            "kind": "bnss_checklist",
            "grounds_checked": [
                "offence_committed",
                "grounds_communicated",
                "relative_informed",
                "memo_attested"
            ],
            "person_informed": "Mohan Lal",
            "relation_to_accused": "father"
        }),
        "court_forwarding" => json!({
            "kind": "court_forwarding",
            "court_name": "Court of the Railway Magistrate, Delhi",
            "forwarding_datetime": "2025-04-13 09:00",
            "escorting_officer": "HC Yadav",
            "documents_enclosed": ["Seizure memo", "Arrest memo"]
        }),
        other => panic!("no fixture for memo kind {}", other),
    }
}

fn memo_payload(kind: &str, complete: bool) -> Value {
    json!({
        "complete": complete,
        "fields": memo_fields(kind),
        "actor": "si.sharma"
    })
}

fn challan_payload(complete: bool) -> Value {
    json!({
        "complete": complete,
        "fields": {
            "court_name": "Court of the Railway Magistrate, Delhi",
            "investigating_officer": "SI Sharma",
            "brief_facts": "Accused apprehended with cut sections of contact wire.",
            "witnesses": ["HC Yadav", "Constable Meena"]
        },
        "actor": "ipf.verma"
    })
}

// Minimal 1x1 white RGB PNG, base64 encoded.
fn signature_b64() -> String {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, 1, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[255, 255, 255]).unwrap();
    }
    BASE64.encode(&data)
}

async fn make_case(app: &Router, case_number: &str) -> String {
    let (status, body) = send(app, Method::POST, "/api/cases", Some(case_payload(case_number))).await;
    assert_eq!(status, StatusCode::OK, "create case: {}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn make_accused(app: &Router, case_id: &str, name: &str) -> String {
    let uri = format!("/api/cases/{}/accused", case_id);
    let (status, body) = send(app, Method::POST, &uri, Some(accused_payload(name))).await;
    assert_eq!(status, StatusCode::OK, "add accused: {}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn save_memo(
    app: &Router,
    case_id: &str,
    accused_id: &str,
    kind: &str,
    complete: bool,
) -> (StatusCode, Value) {
    let uri = format!("/api/cases/{}/accused/{}/memos/{}", case_id, accused_id, kind);
    send(app, Method::PUT, &uri, Some(memo_payload(kind, complete))).await
}

async fn case_status(app: &Router, case_id: &str) -> String {
    let (status, body) = send(app, Method::GET, &format!("/api/cases/{}", case_id), None).await;
    assert_eq!(status, StatusCode::OK);
    body["status"].as_str().unwrap().to_string()
}

const CHALLAN_STEPS: [&str; 5] = [
    "seizure",
    "arrest",
    "personal_search",
    "medical",
    "bnss_checklist",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_and_seeded_lookups() {
    let app = test_app().await;

    let (status, _, body) = get_raw(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, body) = send(&app, Method::GET, "/api/law-sections", None).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body.as_array().unwrap();
    assert!(!sections.is_empty(), "law sections must be seeded");
    assert!(sections.iter().any(|s| s["section"] == "3"));

    let (status, body) = send(&app, Method::GET, "/api/profiles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().unwrap().is_empty(), "profiles must be seeded");

    let (status, body) = send(&app, Method::GET, "/api/railway-posts", None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert!(!posts.is_empty(), "railway posts must be seeded");
    assert!(posts.iter().any(|p| p["name"] == "RPF Post New Delhi"));
}

#[tokio::test]
async fn create_case_rejects_blank_case_number() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::POST, "/api/cases", Some(case_payload("  "))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
}

#[tokio::test]
async fn full_workflow_with_two_accused() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0042").await;
    assert_eq!(case_status(&app, &case_id).await, "draft");

    let a1 = make_accused(&app, &case_id, "Ramesh Kumar").await;
    let a2 = make_accused(&app, &case_id, "Suresh Chand").await;

    // Complete all five steps for the first accused.
    for kind in CHALLAN_STEPS {
        let (status, body) = save_memo(&app, &case_id, &a1, kind, true).await;
        assert_eq!(status, StatusCode::OK, "{}: {}", kind, body);
        assert_eq!(body["is_completed"], true);
    }
    assert_eq!(case_status(&app, &case_id).await, "in_progress");

    // Leave the medical memo missing for the second accused.
    for kind in ["seizure", "arrest", "personal_search", "bnss_checklist"] {
        let (status, _) = save_memo(&app, &case_id, &a2, kind, true).await;
        assert_eq!(status, StatusCode::OK);
    }

    // The aggregator reports the gap.
    let uri = format!("/api/cases/{}/accused/{}/completion", case_id, a2);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complete"], false);
    let medical = body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["kind"] == "medical")
        .unwrap();
    assert_eq!(medical["state"], "missing");

    // Finalizing the challan is blocked, naming the accused and the memo.
    let challan_uri = format!("/api/cases/{}/challan", case_id);
    let (status, body) = send(&app, Method::PUT, &challan_uri, Some(challan_payload(true))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("All accused must have all steps completed"));
    assert!(error.contains("Suresh Chand"));
    assert!(error.contains("Medical Examination Memo"));

    // A draft save is allowed regardless and parks the case for approval.
    let (status, body) = send(&app, Method::PUT, &challan_uri, Some(challan_payload(false))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_completed"], false);
    assert_eq!(case_status(&app, &case_id).await, "pending_approval");

    // Fill the gap, then finalize.
    let (status, _) = save_memo(&app, &case_id, &a2, "medical", true).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::PUT, &challan_uri, Some(challan_payload(true))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_completed"], true);
    assert_eq!(case_status(&app, &case_id).await, "approved");

    // Forwarding every accused to court advances the case; closing ends it.
    for accused in [&a1, &a2] {
        let (status, _) = save_memo(&app, &case_id, accused, "court_forwarding", true).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(case_status(&app, &case_id).await, "forwarded_to_court");

    let close_uri = format!("/api/cases/{}/close", case_id);
    let (status, body) = send(&app, Method::POST, &close_uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "closed");
}

#[tokio::test]
async fn draft_resave_is_idempotent() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0051").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    let (status, first) = save_memo(&app, &case_id, &accused, "seizure", false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["is_completed"], false);

    let (status, second) = save_memo(&app, &case_id, &accused, "seizure", false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["is_completed"], false);
    // Still the same record.
    assert_eq!(second["created_at"], first["created_at"]);

    // Itemized articles survive the round trip through the child table.
    let uri = format!("/api/cases/{}/accused/{}/memos/seizure", case_id, accused);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["fields"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Copper contact wire");
    assert_eq!(items[0]["quantity"], 6);
}

#[tokio::test]
async fn finalized_memo_cannot_revert_to_draft() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0052").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    let (status, _) = save_memo(&app, &case_id, &accused, "arrest", true).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = save_memo(&app, &case_id, &accused, "arrest", false).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("cannot be reverted"));

    // Re-saving complete with corrected fields stays allowed.
    let (status, body) = save_memo(&app, &case_id, &accused, "arrest", true).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_completed"], true);
}

#[tokio::test]
async fn bnss_mandatory_grounds_enforced_on_finalize_only() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0053").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;
    let uri = format!(
        "/api/cases/{}/accused/{}/memos/bnss_checklist",
        case_id, accused
    );

    let mut fields = memo_fields("bnss_checklist");
    fields["grounds_checked"] = json!(["offence_committed"]);
    let partial = json!({"complete": false, "fields": fields.clone()});

    // Drafts are not gated.
    let (status, body) = send(&app, Method::PUT, &uri, Some(partial)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    // Finalizing with a mandatory ground missing is rejected.
    let finalize = json!({"complete": true, "fields": fields});
    let (status, body) = send(&app, Method::PUT, &uri, Some(finalize)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Mandatory ground not selected"));

    // Unknown ground identifiers are rejected too.
    let mut fields = memo_fields("bnss_checklist");
    fields["grounds_checked"].as_array_mut().unwrap().push(json!("looked_suspicious"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"complete": true, "fields": fields}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    assert!(body["error"].as_str().unwrap().contains("Unknown ground"));

    // All mandatory grounds present finalizes.
    let (status, body) = send(&app, Method::PUT, &uri, Some(memo_payload("bnss_checklist", true))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_completed"], true);
}

#[tokio::test]
async fn memo_kind_validation() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0054").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    // Unknown kind in the path.
    let uri = format!("/api/cases/{}/accused/{}/memos/warrant", case_id, accused);
    let (status, _) = send(&app, Method::PUT, &uri, Some(memo_payload("arrest", false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Payload tagged for a different endpoint.
    let uri = format!("/api/cases/{}/accused/{}/memos/arrest", case_id, accused);
    let (status, body) = send(&app, Method::PUT, &uri, Some(memo_payload("seizure", false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    // Memo never saved.
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn close_requires_court_forwarding() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0055").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;
    let (status, _) = save_memo(&app, &case_id, &accused, "seizure", true).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/cases/{}/close", case_id);
    let (status, body) = send(&app, Method::POST, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    assert!(body["error"].as_str().unwrap().contains("Invalid status transition"));
}

#[tokio::test]
async fn closed_case_rejects_writes_without_persisting_them() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0060").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;
    for kind in CHALLAN_STEPS {
        let (status, _) = save_memo(&app, &case_id, &accused, kind, true).await;
        assert_eq!(status, StatusCode::OK);
    }
    let challan_uri = format!("/api/cases/{}/challan", case_id);
    let (status, _) = send(&app, Method::PUT, &challan_uri, Some(challan_payload(true))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = save_memo(&app, &case_id, &accused, "court_forwarding", true).await;
    assert_eq!(status, StatusCode::OK);
    let close_uri = format!("/api/cases/{}/close", case_id);
    let (status, _) = send(&app, Method::POST, &close_uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    // A memo save on the closed case is rejected and must leave the stored
    // fields untouched, not persist them alongside the error.
    let memo_uri = format!("/api/cases/{}/accused/{}/memos/arrest", case_id, accused);
    let mut payload = memo_payload("arrest", true);
    payload["fields"]["place_of_arrest"] = json!("Somewhere else entirely");
    let (status, body) = send(&app, Method::PUT, &memo_uri, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    let (status, body) = send(&app, Method::GET, &memo_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fields"]["place_of_arrest"], "Platform 2, NDLS");

    // Same for the challan.
    let mut payload = challan_payload(true);
    payload["fields"]["court_name"] = json!("Another court");
    let (status, body) = send(&app, Method::PUT, &challan_uri, Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    let (status, body) = send(&app, Method::GET, &challan_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["fields"]["court_name"],
        "Court of the Railway Magistrate, Delhi"
    );
}

#[tokio::test]
async fn concurrent_saves_keep_the_activity_chain_intact() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0061").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    let seizure = save_memo(&app, &case_id, &accused, "seizure", false);
    let arrest = save_memo(&app, &case_id, &accused, "arrest", false);
    let (a, b) = tokio::join!(seizure, arrest);
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let uri = format!("/api/cases/{}/activity", case_id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chain_intact"], true);
    // Case registered, accused added, two memo saves.
    assert_eq!(body["entries"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn memo_pdf_download_with_signature() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0042").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    let uri = format!("/api/cases/{}/accused/{}/memos/seizure", case_id, accused);
    let mut payload = memo_payload("seizure", true);
    payload["signature_png"] = json!(signature_b64());
    let (status, body) = send(&app, Method::PUT, &uri, Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["has_signature"], true);

    let (status, headers, bytes) = get_raw(&app, &format!("{}/pdf", uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header_value(&headers, "content-type"), "application/pdf");
    // Slashes in the case number become hyphens in the filename.
    assert_eq!(
        header_value(&headers, "content-disposition"),
        "attachment; filename=\"SeizureMemo_RPF-2025-0042.pdf\""
    );
    assert!(bytes.starts_with(b"%PDF"));

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let text = doc.extract_text(&[1]).unwrap();
    assert!(text.contains("Seizure Memo"));
    assert!(text.contains("RPF/2025/0042"));
    assert!(text.contains("Ramesh Kumar"));
}

#[tokio::test]
async fn rejects_signature_that_is_not_png() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0056").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;

    let uri = format!("/api/cases/{}/accused/{}/memos/arrest", case_id, accused);
    let mut payload = memo_payload("arrest", false);
    payload["signature_png"] = json!(BASE64.encode(b"GIF89a not a png"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
}

#[tokio::test]
async fn challan_pdf_lists_every_accused() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0057").await;
    let a1 = make_accused(&app, &case_id, "Ramesh Kumar").await;
    let a2 = make_accused(&app, &case_id, "Suresh Chand").await;

    let pdf_uri = format!("/api/cases/{}/challan/pdf", case_id);
    let (status, _, _) = get_raw(&app, &pdf_uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "no challan saved yet");

    for accused in [&a1, &a2] {
        for kind in CHALLAN_STEPS {
            let (status, _) = save_memo(&app, &case_id, accused, kind, true).await;
            assert_eq!(status, StatusCode::OK);
        }
    }
    let challan_uri = format!("/api/cases/{}/challan", case_id);
    let (status, _) = send(&app, Method::PUT, &challan_uri, Some(challan_payload(true))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, bytes) = get_raw(&app, &pdf_uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        header_value(&headers, "content-disposition"),
        "attachment; filename=\"Challan_RPF-2025-0057.pdf\""
    );
    assert!(bytes.starts_with(b"%PDF"));

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let text = doc.extract_text(&pages).unwrap();
    assert!(text.contains("Ramesh Kumar"));
    assert!(text.contains("Suresh Chand"));
}

#[tokio::test]
async fn activity_log_records_an_intact_chain() {
    let app = test_app().await;
    let case_id = make_case(&app, "RPF/2025/0058").await;
    let accused = make_accused(&app, &case_id, "Ramesh Kumar").await;
    save_memo(&app, &case_id, &accused, "seizure", false).await;
    save_memo(&app, &case_id, &accused, "seizure", true).await;

    let uri = format!("/api/cases/{}/activity", case_id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chain_intact"], true);
    let entries = body["entries"].as_array().unwrap();
    // Case registered, accused added, draft save, finalize.
    assert_eq!(entries.len(), 4);
}

#[tokio::test]
async fn case_not_found_is_404() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::GET, "/api/cases/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/cases/nope/challan", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
