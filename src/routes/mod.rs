/// Router Module Index
///
/// Splits the portal's routes by who may reach them. Access control is applied
/// per router in `create_router` (via Axum layers), never inside handlers.

/// Routes open to every visitor: sign-in, registration, marketplace, assistant.
pub mod public;

/// Routes for any signed-in user: the citizen dashboard and the `/admin` entry.
pub mod authenticated;

/// The role-bound officer consoles (`/admin/gs`, `/admin/ds`, `/admin/super`).
pub mod admin;
