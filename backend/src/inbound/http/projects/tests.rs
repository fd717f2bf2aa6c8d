//! Handler tests for project posting endpoints over the in-memory store.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{api_app, memory_state, sign_in};

fn posting(title: &str, category: &str, position: &str) -> Value {
    json!({
        "title": title,
        "summary": "Weekend build",
        "description": "We meet online every Saturday.",
        "category": category,
        "workflow": "online",
        "techStack": ["Rust", "Svelte", "Rust"],
        "recruitment": [{"position": position, "headcount": 1}],
        "teamSize": 3,
        "duration": "2 months"
    })
}

async fn create<S>(app: &S, cookie: &Cookie<'static>, body: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

async fn get_json<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    (status, test::read_body_json(response).await)
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("project id").to_owned()
}

#[actix_web::test]
async fn created_posting_is_readable_and_counts_views() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    let request = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(owner.clone())
        .set_json(posting("Study buddy", "study", "backend"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("location header");
    let created: Value = test::read_body_json(response).await;
    assert_eq!(created["status"], "recruiting");
    assert_eq!(created["techStack"], json!(["Rust", "Svelte"]));
    assert_eq!(location, format!("/api/v1/projects/{}", id_of(&created)));

    let (status, first) = get_json(&app, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["viewCount"], 1);
    assert!(first.get("liked").is_none());
    assert_eq!(first["postedAgo"], "just now");

    let (_, second) = get_json(&app, &location, Some(&owner)).await;
    assert_eq!(second["viewCount"], 2);
    assert_eq!(second["liked"], false);
}

#[actix_web::test]
async fn creating_requires_a_session() {
    let app = test::init_service(api_app(memory_state())).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/projects")
        .set_json(posting("Study buddy", "study", "backend"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::empty_title(json!({"title": "  "}), "title")]
#[case::no_positions(json!({"recruitment": []}), "recruitment")]
#[case::unknown_category(json!({"category": "hackathon"}), "category")]
#[case::bad_contact(json!({"contactUrl": "javascript:alert(1)"}), "contactUrl")]
#[actix_web::test]
async fn invalid_postings_name_the_field(#[case] overrides: Value, #[case] field: &str) {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    let mut body = posting("Study buddy", "study", "backend");
    if let (Some(target), Some(source)) = (body.as_object_mut(), overrides.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    let request = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(owner)
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(response).await;
    assert_eq!(error["details"]["field"], field);
}

#[actix_web::test]
async fn listing_filters_and_pages_with_cursor_links() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    for n in 0..3 {
        create(&app, &owner, posting(&format!("Study {n}"), "study", "backend")).await;
    }
    create(&app, &owner, posting("Contest entry", "contest", "designer")).await;

    let (status, first) =
        get_json(&app, "/api/v1/projects?category=study&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(first["hasMore"], true);
    let next = first["links"]["next"].as_str().expect("next link").to_owned();
    assert!(next.contains("category=study"), "{next}");
    let cursor = first["nextCursor"].as_str().expect("cursor");
    assert!(next.ends_with(&format!("cursor={cursor}")), "{next}");

    let (_, second) = get_json(
        &app,
        &format!("/api/v1/projects?category=study&limit=2&cursor={cursor}"),
        None,
    )
    .await;
    assert_eq!(second["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(second["hasMore"], false);
    assert!(second["links"]["next"].is_null());

    let (_, designers) = get_json(&app, "/api/v1/projects?position=designer", None).await;
    assert_eq!(designers["items"][0]["title"], "Contest entry");
}

#[rstest]
#[case("/api/v1/projects?sort=oldest", "sort")]
#[case("/api/v1/projects?workflow=remote", "workflow")]
#[actix_web::test]
async fn unknown_filter_keywords_are_rejected(#[case] uri: &str, #[case] field: &str) {
    let app = test::init_service(api_app(memory_state())).await;
    let (status, body) = get_json(&app, uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn garbage_cursor_is_a_bad_request() {
    let app = test::init_service(api_app(memory_state())).await;
    let (status, body) = get_json(&app, "/api/v1/projects?cursor=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "cursor");
}

#[actix_web::test]
async fn cursor_from_another_sort_is_rejected() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    for n in 0..2 {
        create(&app, &owner, posting(&format!("Study {n}"), "study", "backend")).await;
    }
    let (_, popular) = get_json(&app, "/api/v1/projects?sort=popular&limit=1", None).await;
    let cursor = popular["nextCursor"].as_str().expect("cursor");

    let (status, body) = get_json(
        &app,
        &format!("/api/v1/projects?sort=latest&cursor={cursor}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "cursor_sort_mismatch");
}

#[actix_web::test]
async fn only_the_owner_may_change_a_posting() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    let stranger = sign_in(&app, "stranger").await;
    let id = id_of(&create(&app, &owner, posting("Study buddy", "study", "backend")).await);

    let request = test::TestRequest::patch()
        .uri(&format!("/api/v1/projects/{id}"))
        .cookie(stranger.clone())
        .set_json(json!({ "title": "Mine now" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );

    let request = test::TestRequest::delete()
        .uri(&format!("/api/v1/projects/{id}"))
        .cookie(stranger)
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );

    let request = test::TestRequest::patch()
        .uri(&format!("/api/v1/projects/{id}"))
        .cookie(owner)
        .set_json(json!({ "title": "Study buddy v2", "teamSize": 5 }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(response).await;
    assert_eq!(updated["title"], "Study buddy v2");
    assert_eq!(updated["teamSize"], 5);
    assert_eq!(updated["category"], "study");
}

#[actix_web::test]
async fn closing_is_idempotent_and_delete_removes_the_posting() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    let id = id_of(&create(&app, &owner, posting("Study buddy", "study", "backend")).await);

    for _ in 0..2 {
        let request = test::TestRequest::post()
            .uri(&format!("/api/v1/projects/{id}/close"))
            .cookie(owner.clone())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], "closed");
    }

    let request = test::TestRequest::delete()
        .uri(&format!("/api/v1/projects/{id}"))
        .cookie(owner)
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::NO_CONTENT
    );
    let (status, _) = get_json(&app, &format!("/api/v1/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn own_projects_lists_only_the_callers_postings() {
    let app = test::init_service(api_app(memory_state())).await;
    let owner = sign_in(&app, "owner").await;
    let other = sign_in(&app, "other").await;
    create(&app, &owner, posting("Mine", "study", "backend")).await;
    create(&app, &other, posting("Theirs", "study", "backend")).await;

    let (status, body) = get_json(&app, "/api/v1/users/me/projects", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["title"], "Mine");
}
