//! Task-local trace id for the request currently being handled.
//!
//! `RequestTrace` opens the scope; error rendering and store-error mapping
//! read it so that logs and problem-details bodies carry the same id.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_scope() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn visible_inside_scope_only() {
        let seen = with_trace_id("abc".to_string(), async { trace_id() }).await;
        assert_eq!(seen, "abc");
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn inner_scope_shadows_outer() {
        with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            assert_eq!(inner, "inner");
            assert_eq!(trace_id(), "outer");
        })
        .await;
    }
}
