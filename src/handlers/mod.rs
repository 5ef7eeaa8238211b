use std::future::Future;

use axum::response::Response;
use serde::Serialize;

use crate::{
    api::ApiResult,
    loader::Loader,
    models::ActionReceipt,
    session::SessionContext,
    views::{PageView, failure_status},
};

/// Public pages and session entry points (login, logout, register).
pub mod public;

/// Citizen dashboard (`/dashboard`).
pub mod citizen;

/// Grama Niladhari console (`/admin/gs`).
pub mod gs;

/// Divisional Secretary console (`/admin/ds`).
pub mod ds;

/// Super admin console (`/admin/super`).
pub mod admin;

/// load_page
///
/// The read path shared by every list/detail screen: load once, render the
/// data, show a banner instead of failing when the upstream does.
pub(crate) async fn load_page<T, F, Fut>(
    path: &str,
    title: &str,
    session: &SessionContext,
    mut loader: Loader<T, F>,
) -> Response
where
    T: Serialize + Default,
    F: Fn() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    loader.load().await;
    let (data, error) = loader.into_parts();
    PageView::new(path, title, Some(session), data)
        .with_error(error)
        .render()
}

/// act_then_reload
///
/// The write path: the action has already run; reload the screen's data so
/// the view reflects it, then report the action's outcome as a notice or
/// banner.
pub(crate) async fn act_then_reload<T, F, Fut>(
    path: &str,
    title: &str,
    session: &SessionContext,
    outcome: ApiResult<ActionReceipt>,
    done: &str,
    mut loader: Loader<T, F>,
) -> Response
where
    T: Serialize + Default,
    F: Fn() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    loader.reload().await;
    let (data, load_error) = loader.into_parts();
    let view = PageView::new(path, title, Some(session), data);

    match outcome {
        Ok(receipt) => view
            .with_notice(receipt.message.unwrap_or_else(|| done.to_string()))
            .with_error(load_error)
            .render(),
        Err(error) => {
            tracing::warn!(path = %path, error = %error, "page action failed");
            let status = failure_status(&error);
            view.with_error(Some(error.to_string())).render_with(status)
        }
    }
}
