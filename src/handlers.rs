use crate::actions::{self, LoginResult};
use crate::errors::AppError;
use crate::models::{CardSignupForm, LoginForm, Notice, SignupForm, UnregisterForm};
use crate::render::ActivityListView;
use crate::session::SessionState;
use crate::state::AppState;
use crate::ui::{render_page, LoginDialogView, PageView, SignupFormView};
use axum::{extract::State, response::Html, Form, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub session: SessionState,
    pub activities: ActivityListView,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = actions::refresh_activities(&state).await;
    page(&state, &view, None, SignupFormView::default(), LoginDialogView::default()).await
}

pub async fn show_login(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = actions::refresh_activities(&state).await;
    let login = LoginDialogView {
        open: true,
        ..LoginDialogView::default()
    };
    page(&state, &view, None, SignupFormView::default(), login).await
}

pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let activities = actions::refresh_activities(&state).await;
    Json(ViewResponse {
        session: state.session().await,
        activities,
    })
}

pub async fn submit_signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Html<String>, AppError> {
    let result = actions::signup_student(&state, &form.activity, &form.email).await;
    let retained = if result.succeeded {
        SignupFormView::default()
    } else {
        SignupFormView {
            email: form.email,
            activity: form.activity,
        }
    };
    page(
        &state,
        &result.view,
        Some(&result.notice),
        retained,
        LoginDialogView::default(),
    )
    .await
}

pub async fn card_signup(
    State(state): State<AppState>,
    Form(form): Form<CardSignupForm>,
) -> Result<Html<String>, AppError> {
    let Some(email) = actions::collect_email(form.email.as_deref()) else {
        let view = actions::current_view(&state).await;
        return page(&state, &view, None, SignupFormView::default(), LoginDialogView::default()).await;
    };

    let result = actions::signup_student(&state, &form.activity, &email).await;
    page(
        &state,
        &result.view,
        Some(&result.notice),
        SignupFormView::default(),
        LoginDialogView::default(),
    )
    .await
}

pub async fn unregister(
    State(state): State<AppState>,
    Form(form): Form<UnregisterForm>,
) -> Result<Html<String>, AppError> {
    let result = actions::unregister_student(&state, &form.activity, &form.email).await;
    page(
        &state,
        &result.view,
        Some(&result.notice),
        SignupFormView::default(),
        LoginDialogView::default(),
    )
    .await
}

pub async fn submit_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>, AppError> {
    let html = match actions::login(&state, &form.username, &form.password).await? {
        LoginResult::Accepted(view) => {
            page(&state, &view, None, SignupFormView::default(), LoginDialogView::default()).await?
        }
        LoginResult::Rejected { message, view } => {
            let login = LoginDialogView {
                open: true,
                username: form.username,
                message: Some(message),
            };
            page(&state, &view, None, SignupFormView::default(), login).await?
        }
    };
    Ok(html)
}

pub async fn submit_logout(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = actions::logout(&state).await?;
    page(&state, &view, None, SignupFormView::default(), LoginDialogView::default()).await
}

async fn page(
    state: &AppState,
    view: &ActivityListView,
    notice: Option<&Notice>,
    signup_form: SignupFormView,
    login: LoginDialogView,
) -> Result<Html<String>, AppError> {
    let session = state.session().await;
    let html = render_page(&PageView {
        session,
        activities: view,
        notice,
        signup_form: &signup_form,
        login: &login,
    })?;
    Ok(Html(html))
}
