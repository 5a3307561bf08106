mod common;

use common::{human_doc, TestEnv};

#[tokio::test]
async fn api_lists_all_humans() {
    let env = TestEnv::with_documents(&[
        (
            "ada-lovelace",
            human_doc("Ada Lovelace", "2023-05-01", "", "English mathematician."),
        ),
        (
            "grace-hopper",
            human_doc("Grace Hopper", "2023-06-01", "", "Computer scientist."),
        ),
    ])
    .await;
    let server = env.server();

    let response = server.get("/api/humans").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().any(|r| r["path"] == "ada-lovelace"));
}

#[tokio::test]
async fn api_filters_by_ethnicity() {
    let env = TestEnv::with_documents(&[
        (
            "activist",
            human_doc(
                "The Activist",
                "2023-01-01",
                "tags: [activist]\nethnicity: [korean]\n",
                "An activist.",
            ),
        ),
        (
            "artist",
            human_doc(
                "The Artist",
                "2023-01-02",
                "tags: [artist]\nethnicity: [japanese]\n",
                "An artist.",
            ),
        ),
    ])
    .await;
    let server = env.server();

    let response = server
        .get("/api/humans")
        .add_query_param("ethnicity", "korean")
        .await;
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["path"], "activist");
}

#[tokio::test]
async fn api_tag_filter_is_case_insensitive() {
    let env = TestEnv::with_documents(&[(
        "ada-lovelace",
        human_doc(
            "Ada Lovelace",
            "2023-05-01",
            "tags: [Mathematician]\n",
            "body",
        ),
    )])
    .await;
    let server = env.server();

    let response = server
        .get("/api/humans")
        .add_query_param("tags", "mathematician")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn api_pagination_applies_after_filtering() {
    let docs: Vec<(String, String)> = (0..6)
        .map(|i| {
            (
                format!("person-{i}"),
                human_doc(&format!("Person {i}"), "2023-01-01", "", "body"),
            )
        })
        .collect();
    let docs_ref: Vec<(&str, String)> = docs
        .iter()
        .map(|(slug, contents)| (slug.as_str(), contents.clone()))
        .collect();

    let env = TestEnv::with_documents(&docs_ref).await;
    let server = env.server();

    let response = server
        .get("/api/humans")
        .add_query_param("offset", "2")
        .add_query_param("limit", "3")
        .await;
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();

    // The API imposes no order, so enumeration (slug) order holds and the
    // window is positions 2..5.
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["path"], "person-2");
    assert_eq!(data[2]["path"], "person-4");
}

#[tokio::test]
async fn api_offset_past_end_is_empty_not_error() {
    let env = TestEnv::with_documents(&[(
        "ada-lovelace",
        human_doc("Ada Lovelace", "2023-05-01", "", "body"),
    )])
    .await;
    let server = env.server();

    let response = server
        .get("/api/humans")
        .add_query_param("offset", "100")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn api_excludes_drafts() {
    let env = TestEnv::with_documents(&[
        (
            "published",
            human_doc("Published", "2023-01-01", "", "body"),
        ),
        (
            "pending",
            human_doc("Pending", "2023-01-02", "draft: true\n", "body"),
        ),
    ])
    .await;
    let server = env.server();

    let response = server.get("/api/humans").await;
    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["path"], "published");
}

#[tokio::test]
async fn api_skips_malformed_documents() {
    let env = TestEnv::with_documents(&[
        ("good", human_doc("Good", "2023-01-01", "", "body")),
        ("bad", "---\ntitle: [unclosed\n---\nbody".to_string()),
    ])
    .await;
    let server = env.server();

    let response = server.get("/api/humans").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn api_missing_content_root_is_500() {
    let env = TestEnv::broken().await;
    let server = env.server_permissive();

    let response = server.get("/api/humans").await;
    response.assert_status_internal_server_error();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Could not fetch humans"));
}
