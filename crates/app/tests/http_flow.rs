use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::request::Builder;
use axum::http::{Request, StatusCode, header};
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use quest_app::routes::{
    MSG_BAD_CREDENTIALS, MSG_CORRECT, MSG_REGISTERED, MSG_UNKNOWN_QUEST, MSG_WRONG,
};
use quest_app::{AppState, build_router};
use quest_core::model::{Grade, QuestCatalog, QuestKey};
use quest_core::time::fixed_clock;
use services::{AppServices, LoginForm};
use storage::repository::Storage;
use tower::ServiceExt;

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl Page {
    fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

/// Drives the router like a browser that keeps cookies between requests.
struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Browser {
    async fn get(&mut self, uri: &str) -> Page {
        self.send(Request::get(uri), Body::empty()).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Page {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_owned())).await
    }

    async fn send(&mut self, mut builder: Builder, body: Body) -> Page {
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() || set_cookie.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        Page {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn register(&mut self, username: &str, password: &str) -> Page {
        self.post(
            "/register",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    async fn login(&mut self, username: &str, password: &str) -> Page {
        self.post("/login", &format!("username={username}&password={password}"))
            .await
    }
}

fn setup() -> (Browser, AppServices) {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(
        &storage,
        fixed_clock(),
        Arc::new(QuestCatalog::builtin()),
    );
    let state = AppState::new(services.clone(), Key::generate(), fixed_clock());
    let browser = Browser {
        app: build_router(state),
        cookies: BTreeMap::new(),
    };
    (browser, services)
}

async fn logged_in(username: &str) -> (Browser, AppServices) {
    let (mut browser, services) = setup();
    browser.register(username, "secret").await.assert_redirect("/");
    browser.login(username, "secret").await.assert_redirect("/dashboard");
    (browser, services)
}

#[tokio::test]
async fn alice_registers_logs_in_and_solves_a_quest() {
    let (mut browser, services) = setup();

    browser.register("alice", "secret").await.assert_redirect("/");
    let page = browser.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(MSG_REGISTERED));
    // Flashes are shown once.
    assert!(!browser.get("/").await.body.contains(MSG_REGISTERED));

    browser.login("alice", "secret").await.assert_redirect("/dashboard");
    browser.get("/").await.assert_redirect("/dashboard");
    let page = browser.get("/dashboard").await;
    assert!(page.body.contains("Привет, alice!"), "{}", page.body);

    let page = browser.get("/quest/2/3").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Реши пример: 3 + 4 - 2 = ?"));

    browser
        .post("/quest/2/3", "answer=5")
        .await
        .assert_redirect("/quests/2");
    let page = browser.get("/quests/2").await;
    assert!(page.body.contains(MSG_CORRECT), "{}", page.body);
    assert!(page.body.contains("выполнено"));

    let alice = services
        .accounts()
        .authenticate(&LoginForm {
            username: "alice".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(alice.grade(), Some(Grade::new(2)));
    assert!(
        services
            .progress()
            .is_completed(alice.id(), QuestKey::from_raw(2, 3))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_visitors() {
    let (mut browser, _) = setup();
    for uri in ["/dashboard", "/quests/1", "/quest/1/1", "/logout"] {
        browser.get(uri).await.assert_redirect("/");
    }
    browser
        .post("/quest/1/1", "answer=x")
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn duplicate_registration_is_rejected_inline() {
    let (mut browser, _) = setup();
    browser.register("alice", "secret").await.assert_redirect("/");

    let page = browser.register("alice", "other").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Это имя уже занято"), "{}", page.body);
    assert!(page.body.contains("value=\"alice\""));

    let page = browser.register("bob", "pw").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Длина должна быть от 3 до 20 символов."));

    // The first account is untouched.
    browser.login("alice", "secret").await.assert_redirect("/dashboard");
}

#[tokio::test]
async fn failed_logins_flash_a_single_generic_message() {
    let (mut browser, _) = setup();
    browser.register("alice", "secret").await.assert_redirect("/");
    browser.get("/").await;

    browser.login("alice", "wrong").await.assert_redirect("/");
    let wrong_password = browser.get("/").await.body;
    browser.login("mallory", "secret").await.assert_redirect("/");
    let unknown_user = browser.get("/").await.body;
    assert!(wrong_password.contains(MSG_BAD_CREDENTIALS));
    assert!(unknown_user.contains(MSG_BAD_CREDENTIALS));

    browser.login("alice", "").await.assert_redirect("/");
    let page = browser.get("/").await;
    assert!(page.body.contains("Пароль: Обязательное поле."), "{}", page.body);
    browser.get("/dashboard").await.assert_redirect("/");
}

#[tokio::test]
async fn wrong_answer_rerenders_without_recording() {
    let (mut browser, services) = logged_in("alice").await;

    let page = browser.post("/quest/2/3", "answer=7").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(MSG_WRONG));
    assert!(page.body.contains("Реши пример: 3 + 4 - 2 = ?"));

    let page = browser.get("/dashboard").await;
    assert!(page.body.contains("Решено заданий: 0"), "{}", page.body);

    let alice = services
        .accounts()
        .authenticate(&LoginForm {
            username: "alice".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert!(alice.completed().is_empty());
}

#[tokio::test]
async fn unknown_quest_redirects_to_grade_list() {
    let (mut browser, _) = logged_in("alice").await;

    browser.get("/quest/2/9").await.assert_redirect("/quests/2");
    let page = browser.get("/quests/2").await;
    assert!(page.body.contains(MSG_UNKNOWN_QUEST), "{}", page.body);

    browser
        .post("/quest/7/1", "answer=1")
        .await
        .assert_redirect("/quests/7");
}

#[tokio::test]
async fn malformed_and_unknown_paths_are_not_found() {
    let (mut browser, _) = logged_in("alice").await;

    assert_eq!(browser.get("/quests/abc").await.status, StatusCode::NOT_FOUND);
    assert_eq!(browser.get("/quest/2/x").await.status, StatusCode::NOT_FOUND);
    assert_eq!(browser.get("/quests/-1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(browser.get("/nowhere").await.status, StatusCode::NOT_FOUND);

    let health = browser.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (mut browser, _) = logged_in("alice").await;
    assert_eq!(browser.get("/dashboard").await.status, StatusCode::OK);

    browser.get("/logout").await.assert_redirect("/");
    browser.get("/dashboard").await.assert_redirect("/");
    assert_eq!(browser.get("/").await.status, StatusCode::OK);
}
