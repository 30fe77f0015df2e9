use axum::Router;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::SignedCookieJar;
use quest_core::model::{Grade, QuestKey, User};
use serde::Deserialize;
use services::{AccountError, AnswerOutcome, Field, LoginForm, ProgressError, RegisterForm};
use tower_http::trace::TraceLayer;
use tracing::info;
use ui::vm::{FormVm, map_dashboard, map_quest_detail, map_quest_list};
use ui::{
    Flash, PageChrome, render_dashboard, render_login, render_quest, render_quest_list,
    render_register,
};

use crate::error::AppError;
use crate::session::{CurrentUser, MaybeUser, push_flash, sign_in, sign_out, take_flashes};
use crate::state::AppState;

pub const MSG_REGISTERED: &str = "Регистрация прошла успешно! Теперь войдите.";
pub const MSG_BAD_CREDENTIALS: &str = "Неверное имя пользователя или пароль";
pub const MSG_UNKNOWN_QUEST: &str = "Такого задания не существует";
pub const MSG_CORRECT: &str = "Правильно! Ты молодец!";
pub const MSG_WRONG: &str = "Неправильно, попробуй ещё раз!";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/register", get(register_page).post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/quests/{grade}", get(quest_list))
        .route("/quest/{grade}/{quest_id}", get(show_quest).post(answer_quest))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn chrome(state: &AppState, title: &str, user: Option<&User>, flashes: &[Flash]) -> PageChrome {
    let chrome = PageChrome::new(title, state.current_year()).with_flashes(flashes);
    match user {
        Some(user) => chrome.with_user(user.username()),
        None => chrome,
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Username => "Имя пользователя",
        Field::Password => "Пароль",
    }
}

/// Path segments must be non-negative integers; anything else is a 404.
fn parse_segment(raw: &str) -> Result<u32, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn quest_key(grade: &str, quest: &str) -> Result<QuestKey, AppError> {
    Ok(QuestKey::from_raw(parse_segment(grade)?, parse_segment(quest)?))
}

fn grade_href(grade: Grade) -> String {
    format!("/quests/{grade}")
}

fn quest_title(key: QuestKey) -> String {
    format!("Задание {}", key.quest)
}

fn unknown_quest(jar: SignedCookieJar, key: QuestKey) -> Response {
    (
        push_flash(jar, Flash::danger(MSG_UNKNOWN_QUEST)),
        Redirect::to(&grade_href(key.grade)),
    )
        .into_response()
}

async fn index(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: SignedCookieJar,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let (jar, flashes) = take_flashes(jar);
    let page = render_login(chrome(&state, "Вход", None, &flashes));
    (jar, Html(page)).into_response()
}

async fn register_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: SignedCookieJar,
) -> Response {
    let (jar, flashes) = take_flashes(jar);
    let chrome = chrome(&state, "Регистрация", user.as_ref(), &flashes);
    (jar, Html(render_register(chrome, FormVm::default()))).into_response()
}

async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match state.services.accounts().register(&form).await {
        Ok(_) => Ok((
            push_flash(jar, Flash::success(MSG_REGISTERED)),
            Redirect::to("/"),
        )
            .into_response()),
        Err(AccountError::Invalid(errors)) => {
            let chrome = chrome(&state, "Регистрация", None, &[]);
            let form = FormVm::with_errors(form.username, &errors);
            Ok(Html(render_register(chrome, form)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.services.accounts().authenticate(&form).await {
        Ok(user) => Ok((sign_in(jar, user.id()), Redirect::to("/dashboard")).into_response()),
        Err(AccountError::Invalid(errors)) => {
            let mut jar = jar;
            for field in [Field::Username, Field::Password] {
                for message in errors.for_field(field) {
                    let text = format!("{}: {message}", field_label(field));
                    jar = push_flash(jar, Flash::danger(text));
                }
            }
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AccountError::BadCredentials) => Ok((
            push_flash(jar, Flash::danger(MSG_BAD_CREDENTIALS)),
            Redirect::to("/"),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

async fn logout(CurrentUser(user): CurrentUser, jar: SignedCookieJar) -> Response {
    info!(user_id = %user.id(), "logged out");
    (sign_out(jar), Redirect::to("/")).into_response()
}

async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
) -> Response {
    let overview = state.services.progress().overview(&user);
    let (jar, flashes) = take_flashes(jar);
    let chrome = chrome(&state, "Кабинет", Some(&user), &flashes);
    let page = render_dashboard(chrome, map_dashboard(&user, &overview));
    (jar, Html(page)).into_response()
}

async fn quest_list(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    Path(grade): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let grade = Grade::new(parse_segment(&grade)?);
    let progress = state.services.progress();
    progress.select_grade(&mut user, grade).await?;

    let board = progress.grade_board(&user, grade);
    let (jar, flashes) = take_flashes(jar);
    let chrome = chrome(&state, &format!("{grade} класс"), Some(&user), &flashes);
    let page = render_quest_list(chrome, map_quest_list(grade, &board));
    Ok((jar, Html(page)).into_response())
}

async fn show_quest(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((grade, quest_id)): Path<(String, String)>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let key = quest_key(&grade, &quest_id)?;
    let progress = state.services.progress();
    let quest = match progress.quest(key) {
        Ok(quest) => quest,
        Err(ProgressError::UnknownQuest(_)) => return Ok(unknown_quest(jar, key)),
        Err(err) => return Err(err.into()),
    };

    let (jar, flashes) = take_flashes(jar);
    let chrome = chrome(&state, &quest_title(key), Some(&user), &flashes);
    let page = render_quest(chrome, map_quest_detail(key, quest));
    Ok((jar, Html(page)).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct AnswerForm {
    #[serde(default)]
    answer: String,
}

async fn answer_quest(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((grade, quest_id)): Path<(String, String)>,
    jar: SignedCookieJar,
    Form(form): Form<AnswerForm>,
) -> Result<Response, AppError> {
    let key = quest_key(&grade, &quest_id)?;
    let progress = state.services.progress();
    match progress.submit_answer(&user, key, &form.answer).await {
        Ok(AnswerOutcome::Correct { .. }) => Ok((
            push_flash(jar, Flash::success(MSG_CORRECT)),
            Redirect::to(&grade_href(key.grade)),
        )
            .into_response()),
        Ok(AnswerOutcome::Incorrect) => {
            let quest = progress.quest(key)?;
            let flashes = [Flash::danger(MSG_WRONG)];
            let chrome = chrome(&state, &quest_title(key), Some(&user), &flashes);
            Ok(Html(render_quest(chrome, map_quest_detail(key, quest))).into_response())
        }
        Err(ProgressError::UnknownQuest(_)) => Ok(unknown_quest(jar, key)),
        Err(err) => Err(err.into()),
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound
}
