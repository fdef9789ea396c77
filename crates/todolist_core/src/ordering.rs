//! Display ordering for lists and todos.
//!
//! Ordering is a stable partition: incomplete items first, then complete
//! items, each group keeping its original relative order. Stored order is
//! never changed.

use crate::model::list::TodoList;
use crate::model::todo::Todo;

/// Returns references to `items` with incomplete ones first.
pub fn partition_incomplete_first<T>(items: &[T], is_complete: impl Fn(&T) -> bool) -> Vec<&T> {
    let (complete, mut incomplete): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|&item| is_complete(item));
    incomplete.extend(complete);
    incomplete
}

pub fn sort_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    partition_incomplete_first(lists, TodoList::is_complete)
}

pub fn sort_todos(todos: &[Todo]) -> Vec<&Todo> {
    partition_incomplete_first(todos, |todo| todo.completed)
}
