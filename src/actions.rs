use crate::errors::{ApiError, AppError, GENERIC_ERROR, LOGIN_FAILED};
use crate::models::{ApiMessage, Notice};
use crate::render::{render_activities, render_failure, ActivityListView};
use crate::session;
use crate::state::AppState;
use tracing::{error, info, warn};

/// Notice and activity list produced by a signup or unregister attempt.
#[derive(Debug)]
pub struct ActionResult {
    pub notice: Notice,
    pub view: ActivityListView,
    pub succeeded: bool,
}

#[derive(Debug)]
pub enum LoginResult {
    Accepted(ActivityListView),
    Rejected {
        message: String,
        view: ActivityListView,
    },
}

/// Fetch the listing, render it for the current session and keep it as the snapshot.
pub async fn refresh_activities(state: &AppState) -> ActivityListView {
    let view = match state.api.list_activities().await {
        Ok(directory) => render_activities(&directory, state.session().await),
        Err(err) => {
            error!("error fetching activities: {err}");
            render_failure()
        }
    };
    *state.snapshot.lock().await = Some(view.clone());
    view
}

/// Last rendered list; fetched once if nothing has been rendered yet.
pub async fn current_view(state: &AppState) -> ActivityListView {
    let cached = state.snapshot.lock().await.clone();
    match cached {
        Some(view) => view,
        None => refresh_activities(state).await,
    }
}

/// Trimmed email from an input step; `None` means the step was abandoned.
pub fn collect_email(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
}

pub async fn signup_student(state: &AppState, activity: &str, email: &str) -> ActionResult {
    let result = state.api.signup(activity, email).await;
    settle(state, result, "signup", activity).await
}

pub async fn unregister_student(state: &AppState, activity: &str, email: &str) -> ActionResult {
    let result = state.api.unregister(activity, email).await;
    settle(state, result, "unregister", activity).await
}

async fn settle(
    state: &AppState,
    result: Result<ApiMessage, ApiError>,
    action: &str,
    activity: &str,
) -> ActionResult {
    match result {
        Ok(body) => {
            info!(activity, "{action} accepted: {}", body.message);
            ActionResult {
                notice: Notice::success(body.message),
                view: refresh_activities(state).await,
                succeeded: true,
            }
        }
        Err(err) => {
            warn!(activity, "{action} failed: {err}");
            ActionResult {
                notice: Notice::error(err.notice_text(GENERIC_ERROR)),
                view: current_view(state).await,
                succeeded: false,
            }
        }
    }
}

pub async fn login(state: &AppState, username: &str, password: &str) -> Result<LoginResult, AppError> {
    if let Err(err) = state.api.login(username, password).await {
        warn!(username, "login failed: {err}");
        return Ok(LoginResult::Rejected {
            message: err.notice_text(LOGIN_FAILED),
            view: current_view(state).await,
        });
    }

    let next = {
        let mut storage = state.storage.lock().await;
        session::login(&state.storage_path, &mut storage).await?
    };
    *state.session.lock().await = next;
    Ok(LoginResult::Accepted(refresh_activities(state).await))
}

pub async fn logout(state: &AppState) -> Result<ActivityListView, AppError> {
    let next = {
        let mut storage = state.storage.lock().await;
        session::logout(&state.storage_path, &mut storage).await?
    };
    *state.session.lock().await = next;
    Ok(refresh_activities(state).await)
}
