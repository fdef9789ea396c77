//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through `escape_html`. Pages receive the
//! flash taken for this render; they never touch the session.

use crate::session::Flash;
use todolist_core::{sort_lists, sort_todos, ListId, Todo, TodoList, NAME_MAX_CHARS};

pub fn list_path(id: ListId) -> String {
    format!("/lists/{id}")
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// CSS class for a list row; `complete` once every todo is done.
pub fn list_class(list: &TodoList) -> &'static str {
    if list.is_complete() {
        "complete"
    } else {
        ""
    }
}

fn layout(title: &str, flash: &Flash, body: &str) -> String {
    let error = flash
        .error
        .as_deref()
        .map(|message| flash_block("error", message))
        .unwrap_or_default();
    let success = flash
        .success
        .as_deref()
        .map(|message| flash_block("success", message))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  \
         <title>{} - Todo Tracker</title>\n</head>\n<body>\n  \
         <header><h1><a href=\"/lists\">Todo Tracker</a></h1></header>\n\
         {error}{success}  <main>\n{body}  </main>\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn flash_block(kind: &str, message: &str) -> String {
    format!(
        "  <div class=\"flash {kind}\"><p>{}</p></div>\n",
        escape_html(message)
    )
}

fn list_name_field(value: &str) -> String {
    format!(
        "      <label for=\"list_name\">Enter the name for your list:</label>\n      \
         <input id=\"list_name\" name=\"list_name\" maxlength=\"{NAME_MAX_CHARS}\" \
         placeholder=\"List Name\" type=\"text\" value=\"{}\">\n",
        escape_html(value)
    )
}

/// Index of all lists, incomplete lists first.
pub fn lists_page(flash: &Flash, lists: &[TodoList]) -> String {
    let rows: String = sort_lists(lists)
        .into_iter()
        .map(|list| {
            format!(
                "      <li class=\"{}\"><a href=\"{}\"><h2>{}</h2><p>{} / {}</p></a></li>\n",
                list_class(list),
                list_path(list.id),
                escape_html(&list.name),
                list.todos_remaining(),
                list.todos_count()
            )
        })
        .collect();
    let empty = if lists.is_empty() {
        "    <p class=\"empty\">You have no lists yet.</p>\n"
    } else {
        ""
    };
    let body = format!(
        "    <ul id=\"lists\">\n{rows}    </ul>\n{empty}    \
         <a class=\"add\" href=\"/lists/new\">New List</a>\n"
    );
    layout("Lists", flash, &body)
}

/// New-list form, pre-filled with `list_name` after a rejected submit.
pub fn new_list_page(flash: &Flash, list_name: &str) -> String {
    let body = format!(
        "    <form action=\"/lists\" method=\"post\">\n      <h2>Add a new list</h2>\n\
         {}      <input type=\"submit\" value=\"Save\">\n      \
         <a href=\"/lists\">Cancel</a>\n    </form>\n",
        list_name_field(list_name)
    );
    layout("New List", flash, &body)
}

/// Edit form for one list, including its delete button.
pub fn edit_list_page(flash: &Flash, list: &TodoList, list_name: &str) -> String {
    let path = list_path(list.id);
    let body = format!(
        "    <form action=\"{path}\" method=\"post\">\n      <h2>Editing '{}'</h2>\n\
         {}      <input type=\"submit\" value=\"Save\">\n      \
         <a href=\"{path}\">Cancel</a>\n    </form>\n    \
         <form action=\"{path}/delete\" method=\"post\" class=\"delete\">\n      \
         <button type=\"submit\">Delete List</button>\n    </form>\n",
        escape_html(&list.name),
        list_name_field(list_name)
    );
    layout(&format!("Edit {}", list.name), flash, &body)
}

fn todo_row(path: &str, todo: &Todo) -> String {
    let todo_path = format!("{path}/todos/{}", todo.id);
    let (class, next_state) = if todo.completed {
        ("complete", "false")
    } else {
        ("", "true")
    };
    format!(
        "        <li class=\"{class}\">\n          \
         <form action=\"{todo_path}\" method=\"post\" class=\"check\">\n            \
         <input type=\"hidden\" name=\"completed\" value=\"{next_state}\">\n            \
         <button type=\"submit\">Toggle</button>\n          </form>\n          \
         <h3>{}</h3>\n          \
         <form action=\"{todo_path}/delete\" method=\"post\" class=\"delete\">\n            \
         <button type=\"submit\">Delete</button>\n          </form>\n        </li>\n",
        escape_html(&todo.name)
    )
}

/// One list with its todos, incomplete todos first.
///
/// `todo_draft` refills the add-todo input after a rejected submit.
pub fn list_page(flash: &Flash, list: &TodoList, todo_draft: &str) -> String {
    let path = list_path(list.id);
    let complete_all = if !list.todos.is_empty() && !list.is_complete() {
        format!(
            "      <form action=\"{path}/complete\" method=\"post\">\n        \
             <button class=\"check\" type=\"submit\">Complete All</button>\n      </form>\n"
        )
    } else {
        String::new()
    };
    let rows: String = sort_todos(&list.todos)
        .into_iter()
        .map(|todo| todo_row(&path, todo))
        .collect();
    let body = format!(
        "    <section id=\"todos\" class=\"{}\">\n      <h2>{}</h2>\n      \
         <p class=\"summary\">{} of {} remaining</p>\n      \
         <a class=\"edit\" href=\"{path}/edit\">Edit List</a>\n\
         {complete_all}      <ul>\n{rows}      </ul>\n    </section>\n    \
         <form action=\"{path}/todos\" method=\"post\">\n      \
         <label for=\"todo\">Enter a new todo item:</label>\n      \
         <input id=\"todo\" name=\"todo\" maxlength=\"{NAME_MAX_CHARS}\" \
         placeholder=\"Something to do\" type=\"text\" value=\"{}\">\n      \
         <input type=\"submit\" value=\"Add\">\n    </form>\n",
        list_class(list),
        escape_html(&list.name),
        list.todos_remaining(),
        list.todos_count(),
        escape_html(todo_draft)
    );
    layout(&list.name, flash, &body)
}
