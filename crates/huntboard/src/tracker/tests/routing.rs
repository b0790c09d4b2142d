use super::common::*;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::tracker::domain::NewJobSource;
use crate::tracker::seed;
use crate::tracker::store::TrackerStore;

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn post_json(uri: &str, user_id: Option<u32>, body: &Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id.to_string());
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("valid request")
}

fn put_json(uri: &str, user_id: Option<u32>, body: &Value) -> Request<Body> {
    let mut builder = Request::put(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id.to_string());
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("valid request")
}

fn get(uri: &str, user_id: Option<u32>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id.to_string());
    }
    builder.body(Body::empty()).expect("valid request")
}

#[tokio::test]
async fn register_returns_created_without_the_password() {
    let router = app(store());

    let (status, body) = send(
        router,
        post_json(
            "/api/auth/register",
            None,
            &json!({ "username": "newcomer", "password": "hunter2" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "newcomer");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let store = store();
    register(&store, "newcomer");
    let router = app(store);

    let (status, body) = send(
        router,
        post_json(
            "/api/auth/login",
            None,
            &json!({ "username": "newcomer", "password": "wrong" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn identity_protected_routes_reject_anonymous_callers() {
    let router = app(store());

    let (status, _) = send(router.clone(), get("/api/applications", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(router, get("/api/jobs/saved", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_identity_headers_are_rejected() {
    let router = app(store());

    let request = Request::get("/api/applications")
        .header("x-user-id", "not-a-number")
        .body(Body::empty())
        .expect("valid request");
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_an_application_twice_conflicts() {
    let store = store();
    let user = register(&store, "applicant");
    let job_id = seed_job(&store, user.id, "Backend Engineer");
    let router = app(store);
    let payload = json!({ "jobId": job_id });

    let (status, _) = send(
        router.clone(),
        post_json("/api/applications", Some(user.id), &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        router,
        post_json("/api/applications", Some(user.id), &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn applying_for_an_unknown_job_is_not_found() {
    let store = store();
    let user = register(&store, "applicant");
    let router = app(store);

    let (status, body) = send(
        router,
        post_json("/api/applications", Some(user.id), &json!({ "jobId": 99999 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "job not found");
}

#[tokio::test]
async fn patching_with_a_bogus_status_is_a_bad_request() {
    let store = store();
    let user = register(&store, "applicant");
    let job_id = seed_job(&store, user.id, "Backend Engineer");
    let router = app(store);

    let (status, body) = send(
        router.clone(),
        post_json("/api/applications", Some(user.id), &json!({ "jobId": job_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_u64().expect("numeric id");

    let request = Request::patch(format!("/api/applications/{id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "status": "ghosted" })).expect("serializes"),
        ))
        .expect("valid request");
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_use_the_camel_case_wire_shape() {
    let store = store();
    let user = seed::demo_data(store.as_ref()).expect("seeds cleanly");
    let router = app(store);

    let (status, body) = send(router, get("/api/applications/stats", Some(user.id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["applied"], 1);
    assert_eq!(body["inReview"], 1);
    assert!(body.get("in_review").is_none());
}

#[tokio::test]
async fn source_sync_reports_the_pulled_job_count() {
    let store = store();
    let user = register(&store, "hunter");
    let router = app(store);

    let (status, body) = send(
        router.clone(),
        post_json(
            "/api/job-sources",
            Some(user.id),
            &json!({ "url": "https://glassdoor.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let source_id = body["id"].as_u64().expect("numeric id");

    let (status, body) = send(
        router,
        post_json(
            &format!("/api/job-sources/{source_id}/sync"),
            Some(user.id),
            &json!({}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["jobsCount"], 3);
}

#[tokio::test]
async fn resume_upload_flows_through_to_the_user_view() {
    let store = store();
    let user = register(&store, "hunter");
    let router = app(store);

    let (status, body) = send(
        router.clone(),
        put_json(
            "/api/user/resume",
            Some(user.id),
            &json!({ "resumeText": "React and Docker experience" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasResume"], true);
    let skills = body["resumeSkills"].as_array().expect("skill list");
    assert!(skills.iter().any(|skill| skill == "react"));
    assert!(body.get("resumeText").is_none());

    let (status, _) = send(
        router,
        put_json("/api/user/resume", Some(user.id), &json!({ "resumeText": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn easy_apply_over_http_records_the_board_note() {
    let store = store();
    let user = register(&store, "hunter");
    let source = store.create_source(NewJobSource {
        user_id: user.id,
        url: "https://linkedin.com/jobs".to_string(),
        name: "Linkedin".to_string(),
    });
    let mut job = listing(source.id, "Frontend Developer");
    job.is_easy_apply = true;
    let job_id = store.create_job(job).id;
    let router = app(store);

    // Applying without a resume on file is refused.
    let uri = format!("/api/jobs/{job_id}/apply");
    let (status, _) = send(router.clone(), post_json(&uri, Some(user.id), &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        router.clone(),
        put_json(
            "/api/user/resume",
            Some(user.id),
            &json!({ "resumeText": "React frontends" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router, post_json(&uri, Some(user.id), &json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notes"], "Applied via Linkedin Easy Apply");
}

#[tokio::test]
async fn match_endpoint_reports_a_whole_percentage() {
    let store = store();
    let user = register(&store, "hunter");
    let job_id = seed_job(&store, user.id, "React TypeScript Developer");
    let router = app(store);
    let uri = format!("/api/jobs/{job_id}/match");

    let (status, body) = send(router.clone(), get(&uri, Some(user.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchScore"], 0);

    let (status, _) = send(
        router.clone(),
        put_json(
            "/api/user/resume",
            Some(user.id),
            &json!({ "resumeText": "Senior React engineer" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router, get(&uri, Some(user.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchScore"], 50);
}

#[tokio::test]
async fn daily_question_and_badges_flow_over_http() {
    let store = store();
    let user = seed::demo_data(store.as_ref()).expect("seeds cleanly");
    let router = app(store);

    let (status, daily) = send(
        router.clone(),
        get("/api/interview-questions/daily", Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(daily["isPinned"], true);
    assert_eq!(daily["field"], "frontend");
    let question_id = daily["id"].as_u64().expect("numeric id");

    for n in 0..7 {
        let (status, _) = send(
            router.clone(),
            post_json(
                "/api/interview-questions/answers",
                Some(user.id),
                &json!({ "questionId": question_id, "answer": format!("take {n}") }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(router, get("/api/badges/user", Some(user.id))).await;
    assert_eq!(status, StatusCode::OK);
    let badges = body["badges"].as_array().expect("badge list");
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0]["badge"]["category"], "streak");
}
