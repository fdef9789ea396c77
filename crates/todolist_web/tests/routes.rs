use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use todolist_web::{router, AppState, SESSION_COOKIE};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Reply {
    fn location(&self) -> &str {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// Drives the router like a browser that keeps the session cookie.
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new() -> Self {
        Self {
            app: router(AppState::new(Key::generate())),
            cookie: None,
        }
    }

    async fn get(&mut self, uri: &str) -> Reply {
        self.send(Method::GET, uri, None, false).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Reply {
        self.send(Method::POST, uri, Some(form), false).await
    }

    async fn post_xhr(&mut self, uri: &str) -> Reply {
        self.send(Method::POST, uri, Some(""), true).await
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<&str>, xhr: bool) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }
        if form.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        if xhr {
            builder = builder.header("x-requested-with", "XMLHttpRequest");
        }
        let request = builder
            .body(Body::from(form.unwrap_or_default().to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        for value in headers.get_all(SET_COOKIE) {
            let pair = value.to_str().unwrap().split(';').next().unwrap().to_string();
            if pair.starts_with(SESSION_COOKIE) {
                self.cookie = Some(pair);
            }
        }
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        Reply {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn create_list(&mut self, name: &str) {
        let reply = self.post("/lists", &format!("list_name={name}")).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER, "{}", reply.body);
    }

    async fn add_todo(&mut self, list_id: u64, name: &str) {
        let reply = self
            .post(&format!("/lists/{list_id}/todos"), &format!("todo={name}"))
            .await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER, "{}", reply.body);
    }
}

#[tokio::test]
async fn root_redirects_to_lists_and_health_answers() {
    let mut browser = Browser::new();

    let root = browser.get("/").await;
    assert_eq!(root.status, StatusCode::SEE_OTHER);
    assert_eq!(root.location(), "/lists");

    let health = browser.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");
}

#[tokio::test]
async fn empty_session_renders_empty_index_and_new_form() {
    let mut browser = Browser::new();

    let index = browser.get("/lists").await;
    assert_eq!(index.status, StatusCode::OK);
    assert!(index.body.contains("You have no lists yet."));

    let form = browser.get("/lists/new").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("action=\"/lists\""));
}

#[tokio::test]
async fn created_list_appears_and_flash_shows_once() {
    let mut browser = Browser::new();

    let created = browser.post("/lists", "list_name=Groceries").await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), "/lists");

    let first = browser.get("/lists").await;
    assert!(first.body.contains("Groceries"));
    assert!(first.body.contains("The list has been created."));

    let second = browser.get("/lists").await;
    assert!(second.body.contains("Groceries"));
    assert!(!second.body.contains("The list has been created."));
}

#[tokio::test]
async fn invalid_list_names_rerender_form_with_error() {
    let mut browser = Browser::new();

    let empty = browser.post("/lists", "list_name=+++").await;
    assert_eq!(empty.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(empty
        .body
        .contains("List name must be between 1 and 100 characters."));

    let too_long = browser
        .post("/lists", &format!("list_name={}", "a".repeat(101)))
        .await;
    assert_eq!(too_long.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(too_long.body.contains(&"a".repeat(101)));

    browser.create_list(&"b".repeat(100)).await;
    browser.create_list("x").await;

    let duplicate = browser.post("/lists", "list_name=x").await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(duplicate.body.contains("List name must be unique."));

    let index = browser.get("/lists").await;
    assert!(!index.body.contains("List name must be unique."));
    assert_eq!(index.body.matches("<li ").count(), 2);
}

#[tokio::test]
async fn missing_list_redirects_to_index_with_error() {
    let mut browser = Browser::new();

    for uri in ["/lists/7", "/lists/abc", "/lists/7/edit"] {
        let reply = browser.get(uri).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(reply.location(), "/lists");

        let index = browser.get("/lists").await;
        assert!(index.body.contains("The specified list was not found."));
    }
}

#[tokio::test]
async fn rename_list_updates_name_and_allows_keeping_it() {
    let mut browser = Browser::new();
    browser.create_list("Home").await;
    browser.create_list("Work").await;

    let edit = browser.get("/lists/1/edit").await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains("value=\"Home\""));

    let same = browser.post("/lists/1", "list_name=Home").await;
    assert_eq!(same.status, StatusCode::SEE_OTHER);

    let clash = browser.post("/lists/1", "list_name=Work").await;
    assert_eq!(clash.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(clash.body.contains("List name must be unique."));

    let renamed = browser.post("/lists/1", "list_name=House").await;
    assert_eq!(renamed.status, StatusCode::SEE_OTHER);
    assert_eq!(renamed.location(), "/lists/1");

    let page = browser.get("/lists/1").await;
    assert!(page.body.contains("<h2>House</h2>"));
    assert!(page.body.contains("The list has been updated."));
}

#[tokio::test]
async fn deleting_a_list_keeps_other_ids_stable() {
    let mut browser = Browser::new();
    browser.create_list("a").await;
    browser.create_list("b").await;
    browser.create_list("c").await;

    let deleted = browser.post("/lists/2/delete", "").await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    assert_eq!(deleted.location(), "/lists");

    let c_page = browser.get("/lists/3").await;
    assert_eq!(c_page.status, StatusCode::OK);
    assert!(c_page.body.contains("<h2>c</h2>"));

    let gone = browser.get("/lists/2").await;
    assert_eq!(gone.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn xhr_delete_list_returns_index_path() {
    let mut browser = Browser::new();
    browser.create_list("a").await;

    let reply = browser.post_xhr("/lists/1/delete").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "/lists");

    let missing = browser.post_xhr("/lists/1/delete").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let index = browser.get("/lists").await;
    assert!(index.body.contains("You have no lists yet."));
    assert!(!index.body.contains("The list has been deleted."));
}

#[tokio::test]
async fn todo_lifecycle_on_a_list() {
    let mut browser = Browser::new();
    browser.create_list("Trip").await;

    let blank = browser.post("/lists/1/todos", "todo=").await;
    assert_eq!(blank.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(blank
        .body
        .contains("Todo name must be between 1 and 100 characters."));

    let too_long = "a".repeat(101);
    let rejected = browser
        .post("/lists/1/todos", &format!("todo={too_long}"))
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected
        .body
        .contains("Todo name must be between 1 and 100 characters."));
    assert!(rejected.body.contains(&format!("value=\"{too_long}\"")));
    assert!(!rejected.body.contains(&format!("<h3>{too_long}</h3>")));

    browser.add_todo(1, "pack").await;
    browser.add_todo(1, "book").await;
    browser.add_todo(1, "leave").await;

    let toggled = browser.post("/lists/1/todos/1", "completed=true").await;
    assert_eq!(toggled.status, StatusCode::SEE_OTHER);
    assert_eq!(toggled.location(), "/lists/1");

    let page = browser.get("/lists/1").await;
    assert!(page.body.contains("The todo has been updated."));
    assert!(page.body.contains("2 of 3 remaining"));
    let book = page.body.find("<h3>book</h3>").unwrap();
    let leave = page.body.find("<h3>leave</h3>").unwrap();
    let pack = page.body.find("<h3>pack</h3>").unwrap();
    assert!(book < leave && leave < pack);

    let deleted = browser.post("/lists/1/todos/2/delete", "").await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    let page = browser.get("/lists/1").await;
    assert!(!page.body.contains("<h3>book</h3>"));
    assert!(page.body.contains("The todo has been deleted."));

    let longest = "a".repeat(100);
    browser.add_todo(1, &longest).await;
    let page = browser.get("/lists/1").await;
    assert!(page.body.contains(&format!("<h3>{longest}</h3>")));
    assert!(page.body.contains("2 of 3 remaining"));
}

#[tokio::test]
async fn complete_all_marks_list_complete_and_leaves_others() {
    let mut browser = Browser::new();
    browser.create_list("Done").await;
    browser.create_list("Open").await;
    browser.create_list("Empty").await;
    browser.add_todo(1, "one").await;
    browser.add_todo(1, "two").await;
    browser.add_todo(2, "three").await;

    let reply = browser.post("/lists/1/complete", "").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location(), "/lists/1");

    let page = browser.get("/lists/1").await;
    assert!(page.body.contains("All todos have been completed."));
    assert!(page.body.contains("0 of 2 remaining"));

    let index = browser.get("/lists").await;
    assert!(index
        .body
        .contains("<li class=\"complete\"><a href=\"/lists/1\"><h2>Done</h2><p>0 / 2</p>"));
    assert!(index.body.contains("<h2>Open</h2><p>1 / 1</p>"));
    assert!(index.body.contains("<li class=\"\"><a href=\"/lists/3\"><h2>Empty</h2><p>0 / 0</p>"));
    let done = index.body.find("<h2>Done</h2>").unwrap();
    let open = index.body.find("<h2>Open</h2>").unwrap();
    let empty = index.body.find("<h2>Empty</h2>").unwrap();
    assert!(open < empty && empty < done);
}

#[tokio::test]
async fn stale_todo_ids_redirect_back_to_the_list() {
    let mut browser = Browser::new();
    browser.create_list("List").await;

    let toggle = browser.post("/lists/1/todos/9", "completed=true").await;
    assert_eq!(toggle.status, StatusCode::SEE_OTHER);
    assert_eq!(toggle.location(), "/lists/1");
    let page = browser.get("/lists/1").await;
    assert!(page.body.contains("The specified todo was not found."));

    let xhr = browser.post_xhr("/lists/1/todos/9/delete").await;
    assert_eq!(xhr.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn xhr_delete_todo_returns_no_content() {
    let mut browser = Browser::new();
    browser.create_list("List").await;
    browser.add_todo(1, "item").await;

    let reply = browser.post_xhr("/lists/1/todos/1/delete").await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let page = browser.get("/lists/1").await;
    assert!(!page.body.contains("<h3>item</h3>"));
}

#[tokio::test]
async fn tampered_cookie_starts_a_fresh_session() {
    let mut browser = Browser::new();
    browser.create_list("Secret").await;

    browser.cookie = Some(format!("{SESSION_COOKIE}=not-a-valid-ciphertext"));
    let index = browser.get("/lists").await;
    assert_eq!(index.status, StatusCode::OK);
    assert!(index.body.contains("You have no lists yet."));
}

#[tokio::test]
async fn sessions_do_not_share_lists() {
    let mut alice = Browser::new();
    alice.create_list("Mine").await;

    let mut other = Browser {
        app: alice.app.clone(),
        cookie: None,
    };
    let index = other.get("/lists").await;
    assert!(!index.body.contains("Mine"));
}

#[tokio::test]
async fn mutation_that_overflows_the_cookie_is_refused() {
    let mut browser = Browser::new();
    let mut saved = 0;
    let mut refused = None;
    for index in 0..40 {
        let name = format!("{index:03}{}", "n".repeat(97));
        let reply = browser.post("/lists", &format!("list_name={name}")).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location(), "/lists");
        let pair = browser.cookie.as_deref().unwrap();
        assert!(pair.len() <= 4096, "cookie grew to {} bytes", pair.len());

        let index_page = browser.get("/lists").await;
        if index_page.body.contains("the session is full") {
            refused = Some(name);
            break;
        }
        assert!(index_page.body.contains("The list has been created."));
        saved += 1;
    }

    let refused = refused.expect("session never filled up");
    assert!(saved > 0);
    let index_page = browser.get("/lists").await;
    assert!(!index_page.body.contains(&refused));
    assert_eq!(index_page.body.matches("<li class=").count(), saved);

    let deleted = browser.post("/lists/1/delete", "").await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    let index_page = browser.get("/lists").await;
    assert!(index_page.body.contains("The list has been deleted."));
    assert_eq!(index_page.body.matches("<li class=").count(), saved - 1);
}
