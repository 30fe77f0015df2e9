use std::sync::Arc;

use quest_core::model::{Grade, QuestCatalog, QuestKey, User};
use quest_core::time::{fixed_clock, fixed_now};
use services::{AppServices, Field, FieldErrors};
use storage::repository::{NewUserRecord, Storage, UserRepository};

use crate::flash::Flash;
use crate::render::{
    render_dashboard, render_error, render_login, render_quest, render_quest_list,
    render_register,
};
use crate::vm::{FormVm, PageChrome, map_dashboard, map_quest_detail, map_quest_list};

fn chrome(title: &str) -> PageChrome {
    PageChrome::new(title, 2026)
}

async fn setup_user() -> (AppServices, User) {
    let storage = Storage::in_memory();
    let id = storage
        .users
        .insert_user(NewUserRecord {
            username: "alice".into(),
            password_hash: "$argon2id$stub".into(),
            created_at: fixed_now(),
        })
        .await
        .expect("insert user");
    let services = AppServices::from_storage(
        &storage,
        fixed_clock(),
        Arc::new(QuestCatalog::builtin()),
    );
    let user = storage.users.get_user(id).await.unwrap().unwrap();
    (services, user)
}

#[test]
fn login_view_smoke_renders_form_and_flash() {
    let flashes = [Flash::danger("Неверное имя пользователя или пароль")];
    let html = render_login(chrome("Вход").with_flashes(&flashes));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("action=\"/login\""), "missing form in {html}");
    assert!(html.contains("Неверное имя пользователя или пароль"));
    assert!(html.contains("flash-danger"));
    assert!(html.contains("© 2026"));
    assert!(!html.contains("/logout"), "anonymous page shows logout: {html}");
}

#[test]
fn register_view_smoke_renders_field_errors() {
    let errors = FieldErrors::single(Field::Username, "Это имя уже занято. Придумайте другое.");
    let html = render_register(chrome("Регистрация"), FormVm::with_errors("alice", &errors));
    assert!(html.contains("Это имя уже занято"), "missing error in {html}");
    assert!(html.contains("value=\"alice\""), "username not echoed in {html}");
}

#[test]
fn register_view_escapes_user_input() {
    let html = render_register(
        chrome("Регистрация"),
        FormVm::with_errors("<script>x</script>", &FieldErrors::new()),
    );
    assert!(!html.contains("<script>x"), "unescaped input in {html}");
}

#[tokio::test]
async fn dashboard_view_smoke_renders_summary() {
    let (services, mut user) = setup_user().await;
    let progress = services.progress();
    progress
        .select_grade(&mut user, Grade::new(2))
        .await
        .unwrap();
    progress
        .complete_quest(user.id(), QuestKey::from_raw(2, 3))
        .await
        .unwrap();
    let user = services.accounts().get_user(user.id()).await.unwrap().unwrap();

    let vm = map_dashboard(&user, &progress.overview(&user));
    let html = render_dashboard(chrome("Кабинет").with_user("alice"), vm);
    assert!(html.contains("Привет, alice!"), "missing greeting in {html}");
    assert!(html.contains("14.11.2023"));
    assert!(html.contains("Текущий класс: 2"));
    assert!(html.contains("Решено заданий: 1"));
    assert!(html.contains("href=\"/quests/4\""));
    assert!(html.contains("/logout"));
}

#[tokio::test]
async fn quest_list_view_smoke_marks_completed() {
    let (services, user) = setup_user().await;
    let progress = services.progress();
    progress
        .complete_quest(user.id(), QuestKey::from_raw(1, 2))
        .await
        .unwrap();
    let user = services.accounts().get_user(user.id()).await.unwrap().unwrap();

    let grade = Grade::new(1);
    let list = map_quest_list(grade, &progress.grade_board(&user, grade));
    let html = render_quest_list(chrome("Задания").with_user("alice"), list);
    assert!(html.contains("href=\"/quest/1/5\""), "missing link in {html}");
    assert!(html.contains("Найди форму"));
    assert_eq!(html.matches("выполнено").count(), 1, "{html}");
    assert!(html.contains("Выполнено: 1 из 5"));
}

#[test]
fn quest_list_view_smoke_handles_empty_grade() {
    let list = map_quest_list(Grade::new(9), &[]);
    let html = render_quest_list(chrome("Задания"), list);
    assert!(html.contains("пока нет заданий"), "{html}");
}

#[test]
fn quest_view_smoke_renders_question() {
    let catalog = QuestCatalog::builtin();
    let key = QuestKey::from_raw(2, 3);
    let quest = catalog.lookup(key).unwrap();
    let html = render_quest(chrome("Задание"), map_quest_detail(key, quest));
    assert!(html.contains("Реши пример: 3 + 4 - 2 = ?"), "{html}");
    assert!(html.contains("action=\"/quest/2/3\""));
    assert!(html.contains("href=\"/quests/2\""));
}

#[test]
fn error_view_smoke_renders_status() {
    let html = render_error(chrome("Ошибка"), 500, "Что-то пошло не так.");
    assert!(html.contains("Ошибка 500"));
    assert!(html.contains("Что-то пошло не так."));
}
