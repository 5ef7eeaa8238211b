use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    api::ApiError,
    navigation::{Area, MenuItem},
    session::SessionContext,
};

/// Banner shown on pages whose backend endpoint does not exist yet.
pub const NOT_CONNECTED: &str = "This page is not connected to a backend endpoint yet.";

/// PageView
///
/// Everything one screen needs: where it sits (area, sidebar), who is signed
/// in, the data, and at most one error banner and one notice.
/// A failed load still renders, with `data` at its empty default.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageView<T> {
    pub area: Option<Area>,
    pub area_label: Option<String>,
    pub title: String,
    pub user: Option<String>,
    pub menu: Vec<MenuItem>,
    pub data: T,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl<T> PageView<T> {
    /// A view inside a console. The area and sidebar derive from `path`.
    pub fn new(path: &str, title: &str, session: Option<&SessionContext>, data: T) -> Self {
        let area = Area::for_path(path);
        Self {
            area,
            area_label: area.map(|a| a.label().to_string()),
            title: title.to_string(),
            user: session.map(|s| s.name.clone()).filter(|n| !n.is_empty()),
            menu: area.map(|a| a.menu(path)).unwrap_or_default(),
            data,
            error: None,
            notice: None,
        }
    }

    /// A public page: no area, no sidebar.
    pub fn public(title: &str, data: T) -> Self {
        Self {
            area: None,
            area_label: None,
            title: title.to_string(),
            user: None,
            menu: Vec::new(),
            data,
            error: None,
            notice: None,
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        if error.is_some() {
            self.error = error;
        }
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

impl<T: Serialize> PageView<T> {
    /// Renders with `200 OK`; any banner is part of the body.
    pub fn render(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }

    pub fn render_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Status code for a failed action. Required-field failures are the
/// visitor's to fix (422), upstream 4xx answers pass through, anything else
/// is a bad gateway (502).
pub fn failure_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::Status { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Explicit answer for pages whose backend endpoint is not wired yet.
pub fn not_connected(path: &str, title: &str, session: &SessionContext) -> Response {
    PageView::new(path, title, Some(session), ())
        .with_error(Some(NOT_CONNECTED.to_string()))
        .render_with(StatusCode::NOT_IMPLEMENTED)
}

/// Keeps the first banner of several independent loads.
pub fn first_error(errors: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    errors.into_iter().flatten().next()
}
