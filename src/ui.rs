use crate::models::{Notice, NoticeKind};
use crate::render::{ActivityListView, ParticipantsBlock};
use crate::session::SessionState;
use askama::Template;

/// Values the signup form is drawn with; empty after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFormView {
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDialogView {
    pub open: bool,
    pub username: String,
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct PageView<'a> {
    pub session: SessionState,
    pub activities: &'a ActivityListView,
    pub notice: Option<&'a Notice>,
    pub signup_form: &'a SignupFormView,
    pub login: &'a LoginDialogView,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

pub fn render_page(page: &PageView<'_>) -> Result<String, askama::Error> {
    page.render()
}
