//! Route handlers.
//!
//! Every mutating handler follows one shape: load the session, run one
//! `ListService` call, set a flash message, redirect, write the session back.
//! Validation failures re-render the originating form with status 422.
//! A mutation that would overflow the session cookie is discarded.
//! Stale list ids redirect to the index; stale todo ids redirect to the list.

use crate::error::WebResult;
use crate::session::{Flash, Session};
use crate::views::{self, list_path};
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::PrivateCookieJar;
use log::{info, warn};
use serde::Deserialize;
use todolist_core::{ListId, ListServiceError, TodoId, TodoList};

/// Assigned ids start at 1, so an unparsable id never matches.
const UNASSIGNED_ID: u64 = 0;
const XHR_HEADER_VALUE: &str = "XMLHttpRequest";
const SESSION_FULL_MESSAGE: &str =
    "The change was not saved because the session is full. Delete a list or some todos first.";

#[derive(Debug, Default, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: String,
}

pub async fn root() -> Redirect {
    Redirect::to("/lists")
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn lists_index(jar: PrivateCookieJar) -> WebResult<Response> {
    let mut session = Session::load(&jar);
    let flash = session.flash.take();
    let body = views::lists_page(&flash, &session.lists);
    finish(session, jar, Html(body))
}

pub async fn new_list_form(jar: PrivateCookieJar) -> WebResult<Response> {
    let mut session = Session::load(&jar);
    let flash = session.flash.take();
    let body = views::new_list_page(&flash, "");
    finish(session, jar, Html(body))
}

pub async fn create_list(
    jar: PrivateCookieJar,
    Form(form): Form<ListNameForm>,
) -> WebResult<Response> {
    let mut session = Session::load(&jar);
    let result = session.service().create_list(&form.list_name);
    match result {
        Ok(list_id) => {
            info!("event=list_create module=web status=ok list_id={list_id}");
            session.flash_success("The list has been created.");
            commit(session, jar, "/lists")
        }
        Err(err) => {
            warn!(
                "event=list_create module=web status=rejected {}",
                log_fields(&err)
            );
            session.flash_error(err.to_string());
            let flash = session.flash.take();
            let body = views::new_list_page(&flash, &form.list_name);
            finish(session, jar, (StatusCode::UNPROCESSABLE_ENTITY, Html(body)))
        }
    }
}

pub async fn show_list(
    jar: PrivateCookieJar,
    Path(raw_list_id): Path<String>,
) -> WebResult<Response> {
    let session = Session::load(&jar);
    render_list(session, jar, parse_id(&raw_list_id), StatusCode::OK, |flash, list| {
        views::list_page(flash, list, "")
    })
}

pub async fn edit_list_form(
    jar: PrivateCookieJar,
    Path(raw_list_id): Path<String>,
) -> WebResult<Response> {
    let session = Session::load(&jar);
    render_list(session, jar, parse_id(&raw_list_id), StatusCode::OK, |flash, list| {
        views::edit_list_page(flash, list, &list.name)
    })
}

pub async fn update_list(
    jar: PrivateCookieJar,
    Path(raw_list_id): Path<String>,
    Form(form): Form<ListNameForm>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let mut session = Session::load(&jar);
    let result = session.service().rename_list(list_id, &form.list_name);
    match result {
        Ok(()) => {
            info!("event=list_rename module=web status=ok list_id={list_id}");
            session.flash_success("The list has been updated.");
            commit(session, jar, &list_path(list_id))
        }
        Err(err) if err.is_validation() => {
            warn!(
                "event=list_rename module=web status=rejected list_id={list_id} {}",
                log_fields(&err)
            );
            session.flash_error(err.to_string());
            render_list(
                session,
                jar,
                list_id,
                StatusCode::UNPROCESSABLE_ENTITY,
                |flash, list| views::edit_list_page(flash, list, &form.list_name),
            )
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

pub async fn delete_list(
    jar: PrivateCookieJar,
    headers: HeaderMap,
    Path(raw_list_id): Path<String>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let mut session = Session::load(&jar);
    let result = session.service().delete_list(list_id);
    match result {
        Ok(list) => {
            info!(
                "event=list_delete module=web status=ok list_id={} todos={}",
                list.id,
                list.todos_count()
            );
            if is_xhr(&headers) {
                return finish(session, jar, "/lists");
            }
            session.flash_success("The list has been deleted.");
            commit(session, jar, "/lists")
        }
        Err(err) if is_xhr(&headers) => {
            warn!("event=list_delete module=web status=not_found list_id={list_id}");
            Ok((StatusCode::NOT_FOUND, err.to_string()).into_response())
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

pub async fn add_todo(
    jar: PrivateCookieJar,
    Path(raw_list_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let mut session = Session::load(&jar);
    let result = session.service().add_todo(list_id, &form.todo);
    match result {
        Ok(todo_id) => {
            info!("event=todo_add module=web status=ok list_id={list_id} todo_id={todo_id}");
            session.flash_success("The todo was added.");
            commit(session, jar, &list_path(list_id))
        }
        Err(err) if err.is_validation() => {
            warn!(
                "event=todo_add module=web status=rejected list_id={list_id} {}",
                log_fields(&err)
            );
            session.flash_error(err.to_string());
            render_list(
                session,
                jar,
                list_id,
                StatusCode::UNPROCESSABLE_ENTITY,
                |flash, list| views::list_page(flash, list, &form.todo),
            )
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

pub async fn update_todo(
    jar: PrivateCookieJar,
    Path((raw_list_id, raw_todo_id)): Path<(String, String)>,
    Form(form): Form<CompletedForm>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let todo_id: TodoId = parse_id(&raw_todo_id);
    let completed = form.completed == "true";
    let mut session = Session::load(&jar);
    let result = session
        .service()
        .set_todo_completed(list_id, todo_id, completed);
    match result {
        Ok(()) => {
            info!(
                "event=todo_update module=web status=ok list_id={list_id} todo_id={todo_id} completed={completed}"
            );
            session.flash_success("The todo has been updated.");
            commit(session, jar, &list_path(list_id))
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

pub async fn delete_todo(
    jar: PrivateCookieJar,
    headers: HeaderMap,
    Path((raw_list_id, raw_todo_id)): Path<(String, String)>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let todo_id: TodoId = parse_id(&raw_todo_id);
    let mut session = Session::load(&jar);
    let result = session.service().delete_todo(list_id, todo_id);
    match result {
        Ok(()) => {
            info!("event=todo_delete module=web status=ok list_id={list_id} todo_id={todo_id}");
            if is_xhr(&headers) {
                return finish(session, jar, StatusCode::NO_CONTENT);
            }
            session.flash_success("The todo has been deleted.");
            commit(session, jar, &list_path(list_id))
        }
        Err(err) if is_xhr(&headers) => {
            warn!("event=todo_delete module=web status=not_found list_id={list_id} todo_id={todo_id}");
            Ok((StatusCode::NOT_FOUND, err.to_string()).into_response())
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

pub async fn complete_all(
    jar: PrivateCookieJar,
    Path(raw_list_id): Path<String>,
) -> WebResult<Response> {
    let list_id = parse_id(&raw_list_id);
    let mut session = Session::load(&jar);
    let result = session.service().complete_all(list_id);
    match result {
        Ok(changed) => {
            info!("event=todo_complete_all module=web status=ok list_id={list_id} changed={changed}");
            session.flash_success("All todos have been completed.");
            commit(session, jar, &list_path(list_id))
        }
        Err(err) => redirect_after_error(session, jar, err),
    }
}

/// Writes the session back and attaches the cookie to `response`.
fn finish(
    session: Session,
    jar: PrivateCookieJar,
    response: impl IntoResponse,
) -> WebResult<Response> {
    let jar = session.store(jar)?;
    Ok((jar, response).into_response())
}

/// Stores a mutated session and redirects to `target`.
///
/// A session that no longer fits in the cookie would be dropped by the
/// browser, so the mutation is discarded instead: the session as it arrived
/// in `jar` is kept and carries an error flash.
fn commit(session: Session, jar: PrivateCookieJar, target: &str) -> WebResult<Response> {
    if session.fits_cookie()? {
        return finish(session, jar, Redirect::to(target));
    }
    warn!(
        "event=session_oversize module=web status=refused lists={} redirect={target}",
        session.lists.len()
    );
    let mut previous = Session::load(&jar);
    previous.flash = Flash::default();
    previous.flash_error(SESSION_FULL_MESSAGE);
    finish(previous, jar, Redirect::to(target))
}

/// Renders a page for one list, or redirects when the list is gone.
///
/// The pending flash is consumed only when the page actually renders.
fn render_list(
    mut session: Session,
    jar: PrivateCookieJar,
    list_id: ListId,
    status: StatusCode,
    render: impl FnOnce(&Flash, &TodoList) -> String,
) -> WebResult<Response> {
    let (service, flash) = session.split();
    let rendered = service
        .get_list(list_id)
        .map(|list| render(&flash.take(), list));
    match rendered {
        Ok(body) => finish(session, jar, (status, Html(body))),
        Err(err) => redirect_after_error(session, jar, err),
    }
}

fn redirect_after_error(
    mut session: Session,
    jar: PrivateCookieJar,
    err: ListServiceError,
) -> WebResult<Response> {
    let target = match &err {
        ListServiceError::TodoNotFound { list_id, .. } => list_path(*list_id),
        _ => "/lists".to_string(),
    };
    warn!(
        "event=lookup_failed module=web status=not_found {} redirect={target}",
        log_fields(&err)
    );
    session.flash_error(err.to_string());
    finish(session, jar, Redirect::to(&target))
}

/// Key/value fields describing `err` for a log line: kind and ids, no names.
fn log_fields(err: &ListServiceError) -> String {
    match err {
        ListServiceError::ListNotFound(list_id) => {
            format!("reason={} list_id={list_id}", err.kind())
        }
        ListServiceError::TodoNotFound { list_id, todo_id } => {
            format!("reason={} list_id={list_id} todo_id={todo_id}", err.kind())
        }
        _ => format!("reason={}", err.kind()),
    }
}

fn parse_id(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(UNASSIGNED_ID)
}

fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case(XHR_HEADER_VALUE))
}
