//! End-to-end tests against a running wiki server.

use reqwest::StatusCode;
use std::time::Duration;

mod common;

#[tokio::test]
async fn test_view_unsaved_redirects_to_edit() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client.get(wiki.url("/view/NeverSaved")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/edit/NeverSaved");
}

#[tokio::test]
async fn test_edit_unsaved_is_blank_form() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client.get(wiki.url("/edit/NeverSaved")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = res.text().await.unwrap();
    assert!(html.contains(r#"action="/save/NeverSaved""#));
    assert!(html.contains(r#"cols="80"></textarea>"#));
}

#[tokio::test]
async fn test_save_then_view() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client
        .post(wiki.url("/save/T"))
        .form(&[("body", "hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/view/T");

    let res = client.get(wiki.url("/view/T")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("hello"));

    let on_disk = std::fs::read(wiki.data_dir.path().join("T.txt")).unwrap();
    assert_eq!(on_disk, b"hello");
}

#[tokio::test]
async fn test_last_write_wins() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    for body in ["first draft", "second draft"] {
        let res = client
            .post(wiki.url("/save/Draft"))
            .form(&[("body", body)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    let html = client
        .get(wiki.url("/view/Draft"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("second draft"));
    assert!(!html.contains("first draft"));
}

#[tokio::test]
async fn test_edit_existing_prefills_body() {
    let wiki = common::start_wiki().await;
    let client = common::client();
    std::fs::write(wiki.data_dir.path().join("Existing.txt"), "already here").unwrap();

    let html = client
        .get(wiki.url("/edit/Existing"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(">already here</textarea>"));
}

#[tokio::test]
async fn test_unknown_paths_are_404() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    for path in ["/", "/view/", "/delete/foo", "/view/bad%20name", "/view/..%2F..%2Fetc"] {
        let res = client.get(wiki.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {path}");
        assert_eq!(res.text().await.unwrap(), "404 page not found\n");
    }
}

#[tokio::test]
async fn test_save_with_invalid_title_writes_nothing() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client
        .post(wiki.url("/save/..%2Fescape"))
        .form(&[("body", "nope")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(std::fs::read_dir(wiki.data_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_method_mismatch() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client.get(wiki.url("/save/Home")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "POST");

    let res = client.get(wiki.url("/save/bad.name")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(wiki.url("/edit/..%2Fx")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_without_form_saves_empty_page() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client.post(wiki.url("/save/Empty")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(std::fs::read(wiki.data_dir.path().join("Empty.txt")).unwrap(), b"");
}

#[tokio::test]
async fn test_save_failure_returns_500() {
    let wiki = common::start_wiki_with(|config| {
        config.storage.data_dir = config.storage.data_dir.join("missing");
    })
    .await;
    let client = common::client();

    let res = client
        .post(wiki.url("/save/Home"))
        .form(&[("body", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().starts_with("Home.txt: "));
}

#[tokio::test]
async fn test_custom_template_dir() {
    let templates = tempfile::tempdir().unwrap();
    std::fs::write(templates.path().join("view.html"), "VIEW {{ title }}: {{ body }}").unwrap();
    std::fs::write(templates.path().join("edit.html"), "EDIT {{ title }}").unwrap();
    let template_dir = templates.path().to_path_buf();

    let wiki = common::start_wiki_with(move |config| {
        config.templates.dir = Some(template_dir);
    })
    .await;
    let client = common::client();
    std::fs::write(wiki.data_dir.path().join("Page.txt"), "text").unwrap();

    let view = client.get(wiki.url("/view/Page")).send().await.unwrap();
    assert_eq!(view.text().await.unwrap(), "VIEW Page: text");

    let edit = client.get(wiki.url("/edit/Other")).send().await.unwrap();
    assert_eq!(edit.text().await.unwrap(), "EDIT Other");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let res = client
        .get(wiki.url("/edit/Home"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_concurrent_saves_leave_one_complete_body() {
    let wiki = common::start_wiki().await;
    let client = common::client();

    let bodies: Vec<String> = (0..8).map(|i| format!("body number {i} ").repeat(100)).collect();
    let mut tasks = Vec::new();
    for body in bodies.clone() {
        let client = client.clone();
        let url = wiki.url("/save/Race");
        tasks.push(tokio::spawn(async move {
            client.post(url).form(&[("body", body)]).send().await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::FOUND);
    }

    let stored = std::fs::read_to_string(wiki.data_dir.path().join("Race.txt")).unwrap();
    assert!(bodies.contains(&stored), "stored body must be one complete submission");
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let wiki = common::start_wiki().await;
    let client = common::client();
    let url = wiki.url("/edit/Home");

    assert_eq!(client.get(&url).send().await.unwrap().status(), StatusCode::OK);

    wiki.shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let fresh = common::client();
    assert!(fresh.get(&url).send().await.is_err());
}
