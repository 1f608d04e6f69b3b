//! Ambient context
//!
//! Key/value pairs bound here are merged into every event emitted from the
//! same logical task until they are unbound or cleared.
//!
//! Outside any scope the store is thread-local. `with_isolated_context`,
//! `spawn_with_context` and `scoped_context` open a task-local store seeded
//! with a copy of the caller's context; inside such a scope every operation
//! in this module targets the scope and the caller's store is untouched.
//!
//! A tokio task started with plain `tokio::spawn` has no store: worker
//! threads are shared between tasks, so the thread-local one cannot be used.
//! Such a task sees an empty context, and bindings made from it are dropped
//! with a one-time warning event.
//!
//! # Example
//!
//! ```
//! use mylogger::context::{bind_context, context_snapshot, unbind_context};
//! use mylogger::fields;
//!
//! bind_context(fields! { request_id = "abc-123", user_id = 456 });
//! unbind_context(["user_id"]);
//! assert_eq!(context_snapshot().len(), 1);
//! ```

use crate::event::{Fields, Record};
use crate::facade::{self, FACADE_LOGGER};
use crate::fields;
use mylogger_core_types::Level;
use std::cell::RefCell;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

tokio::task_local! {
    static TASK_CONTEXT: RefCell<Fields>;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Fields> = RefCell::new(Fields::new());
}

static UNSCOPED_BIND_WARNED: AtomicBool = AtomicBool::new(false);

fn in_task_scope() -> bool {
    TASK_CONTEXT.try_with(|_| ()).is_ok()
}

fn in_unscoped_task() -> bool {
    tokio::task::try_id().is_some() && !in_task_scope()
}

fn with_store<R: Default>(f: impl FnOnce(&mut Fields) -> R) -> R {
    if in_task_scope() {
        TASK_CONTEXT
            .try_with(|store| f(&mut store.borrow_mut()))
            .unwrap_or_default()
    } else if tokio::task::try_id().is_some() {
        R::default()
    } else {
        // Fails only while the thread is being torn down
        THREAD_CONTEXT
            .try_with(|store| f(&mut store.borrow_mut()))
            .unwrap_or_default()
    }
}

fn warn_unscoped_bind(keys: Vec<String>) {
    if UNSCOPED_BIND_WARNED.swap(true, Ordering::Relaxed) {
        return;
    }
    facade::current().emit(
        Record::new(
            Level::Warning,
            "context bound in a tokio task outside a context scope, binding dropped",
            FACADE_LOGGER,
        )
        .with_fields(fields! {
            keys = keys,
            hint = "spawn with spawn_with_context or wrap in with_isolated_context",
        }),
    );
}

/// Merge fields into the ambient context, overwriting existing keys.
pub fn bind_context(fields: Fields) {
    if in_unscoped_task() {
        warn_unscoped_bind(fields.keys().cloned().collect());
        return;
    }
    with_store(|store| store.extend(fields));
}

/// Remove the named keys. Absent keys are ignored.
pub fn unbind_context<I, K>(keys: I)
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    with_store(|store| {
        for key in keys {
            store.remove(key.as_ref());
        }
    });
}

/// Remove every ambient field.
pub fn clear_context() {
    with_store(|store| store.clear());
}

/// Copy of the current ambient context.
pub fn context_snapshot() -> Fields {
    with_store(|store| store.clone())
}

/// Run `future` with its own context, seeded from the caller's context at
/// the time of this call.
pub fn with_isolated_context<F: Future>(future: F) -> impl Future<Output = F::Output> {
    TASK_CONTEXT.scope(RefCell::new(context_snapshot()), future)
}

/// `tokio::spawn` a future inside its own context scope.
pub fn spawn_with_context<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(with_isolated_context(future))
}

/// Run a closure with its own context, seeded from the caller's context.
pub fn scoped_context<R>(f: impl FnOnce() -> R) -> R {
    TASK_CONTEXT.sync_scope(RefCell::new(context_snapshot()), f)
}
