use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::info;
use tripbook_core::{BookingDraft, BookingType, Command, CommandError, Outcome};
use uuid::Uuid;

use crate::error::AppError;
use crate::session;
use crate::state::AppState;
use crate::view::{self, PageForm, ViewFilter};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub view: Option<String>,
    pub notice: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/bookings", post(add_booking))
        .route("/bookings/suggest", post(suggest_from_link))
        .route("/bookings/{id}", post(update_booking))
        .route("/bookings/{id}/edit", post(open_edit_form))
        .route("/bookings/{id}/delete", post(remove_booking))
        .route("/edit/cancel", post(cancel_edit))
}

/// GET /
async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    let filter = ViewFilter::parse(query.view.as_deref());
    let notice = query.notice.as_deref().and_then(notice_text).map(str::to_string);

    let page = state
        .sessions
        .read(&sid, |s| {
            let mut form = PageForm::for_session(s);
            form.notice = notice;
            view::render_page(s, &form, filter)
        })
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok((jar, Html(page)))
}

/// POST /bookings
async fn add_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(draft): Form<BookingDraft>,
) -> Result<(CookieJar, Response), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    let response = match apply(&state, sid, Command::AddBooking(draft)).await? {
        Applied::Done(Outcome::Added(id)) => {
            info!(session = %sid, booking = %id, "Booking added");
            Redirect::to("/?notice=added").into_response()
        }
        Applied::Done(_) => Redirect::to("/").into_response(),
        Applied::Rejected(page) => page,
    };
    Ok((jar, response))
}

/// POST /bookings/suggest
/// Fills blank title and city from the listing link and re-renders the form
async fn suggest_from_link(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut draft): Form<BookingDraft>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    let found = draft.apply_link_suggestion();

    let page = state
        .sessions
        .read(&sid, |s| {
            let mut form = PageForm { draft, editing: s.editing, error: None, notice: None };
            if found {
                form.notice = Some("Filled in details from the link.".to_string());
            } else {
                form.error = Some("Couldn't infer anything from that link. Please fill the fields manually.".to_string());
            }
            view::render_page(s, &form, ViewFilter::All)
        })
        .await
        .ok_or_else(AppError::session_expired)?;

    Ok((jar, Html(page)))
}

/// POST /bookings/:id
async fn update_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(draft): Form<BookingDraft>,
) -> Result<(CookieJar, Response), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    let response = match apply(&state, sid, Command::UpdateBooking { id, draft }).await? {
        Applied::Done(_) => {
            info!(session = %sid, booking = %id, "Booking updated");
            Redirect::to("/?notice=updated").into_response()
        }
        Applied::Rejected(page) => page,
    };
    Ok((jar, response))
}

/// POST /bookings/:id/edit
async fn open_edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    apply(&state, sid, Command::OpenEditForm(id)).await?;
    Ok((jar, Redirect::to("/")))
}

/// POST /bookings/:id/delete
async fn remove_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    apply(&state, sid, Command::RemoveBooking(id)).await?;
    info!(session = %sid, booking = %id, "Booking removed");
    Ok((jar, Redirect::to("/?notice=removed")))
}

/// POST /edit/cancel
async fn cancel_edit(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    apply(&state, sid, Command::CancelEdit).await?;
    Ok((jar, Redirect::to("/")))
}

enum Applied {
    Done(Outcome),
    /// Validation failed; the page re-rendered with the message and the user's input
    Rejected(Response),
}

async fn apply(state: &AppState, sid: Uuid, command: Command) -> Result<Applied, AppError> {
    // A rejected add re-renders the add form even while an edit is open
    let (draft, target) = match &command {
        Command::AddBooking(d) => (Some(d.clone()), None),
        Command::UpdateBooking { id, draft } => (Some(draft.clone()), Some(*id)),
        _ => (None, None),
    };

    state
        .sessions
        .with_session(&sid, move |s| match s.dispatch(command) {
            Ok(outcome) => Ok(Applied::Done(outcome)),
            Err(CommandError::Validation(err)) => {
                let draft = draft.unwrap_or_else(|| BookingDraft::new(BookingType::Flight));
                let form = PageForm::with_error(draft, target, err.to_string());
                let page = view::render_page(s, &form, ViewFilter::All);
                Ok(Applied::Rejected((StatusCode::BAD_REQUEST, Html(page)).into_response()))
            }
            Err(err) => Err(AppError::from_command(err)),
        })
        .await
        .unwrap_or_else(|| Err(AppError::session_expired()))
}

fn notice_text(code: &str) -> Option<&'static str> {
    match code {
        "added" => Some("Booking added!"),
        "updated" => Some("Booking updated."),
        "removed" => Some("Booking removed."),
        _ => None,
    }
}
