use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use supportly_store::Flash;
use supportly_types::api::{Action, ActionForm, FormData, PageQuery};
use supportly_types::models::TicketId;
use supportly_types::views::{AuthFormView, DashboardView, LandingView, Page, TicketsView, View};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::session::SessionContext;
use crate::tickets;

fn redirect_to(page: Page) -> Redirect {
    Redirect::to(&format!("/?page={}", page.as_str()))
}

fn redirect_to_edit(ticket_id: Option<TicketId>) -> Redirect {
    match ticket_id {
        Some(id) => Redirect::to(&format!("/?page=tickets&edit={id}")),
        None => redirect_to(Page::Tickets),
    }
}

/// Page-level access rules applied before any action runs.
fn guard(session: &mut SessionContext, query: &PageQuery) -> Option<Redirect> {
    let page = query.page_name().parse::<Page>().ok()?;
    let authenticated = session.state.current_user().is_some();

    if page.is_protected() && !authenticated {
        let flash = &mut session.state.flash;
        flash.success = None;
        flash.set_error(vec!["Please login to access this page".into()]);
        return Some(redirect_to(Page::Login));
    }
    if page.is_auth_form() && authenticated {
        return Some(redirect_to(Page::Dashboard));
    }
    None
}

/// GET /: render the page named in the query.
pub async fn show_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    session: Session,
) -> Result<Response, ApiError> {
    let mut session = SessionContext::load(session).await?;

    let response = match guard(&mut session, &query) {
        Some(redirect) => redirect.into_response(),
        None => render_page(&state, &mut session, &query),
    };

    session.save().await?;
    Ok(response)
}

/// POST /: run the submitted action. Unknown actions fall through to the
/// same rendering a GET would produce.
pub async fn submit_action(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    session: Session,
    Form(form): Form<ActionForm>,
) -> Result<Response, ApiError> {
    let mut session = SessionContext::load(session).await?;

    let response = if let Some(redirect) = guard(&mut session, &query) {
        redirect.into_response()
    } else if let Some(action) = form.into_action() {
        debug!("Dispatching action {}", action.name());
        dispatch(&mut session, action).await?.into_response()
    } else {
        render_page(&state, &mut session, &query)
    };

    session.save().await?;
    Ok(response)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Performs one action, leaving exactly one flash message behind, and picks
/// the redirect target. Only transport-level failures escape as `Err`.
pub async fn dispatch(session: &mut SessionContext, action: Action) -> Result<Redirect, ApiError> {
    // Messages from a request that was never rendered are stale.
    session.state.flash = Flash::default();

    match action {
        Action::Register(form) => match auth::register(&mut session.state, &form) {
            Ok(_) => {
                session
                    .state
                    .flash
                    .set_success("Registration successful! Welcome to Supportly");
                Ok(redirect_to(Page::Dashboard))
            }
            Err(err) => {
                let flash = &mut session.state.flash;
                flash.set_error(err.into_messages()?);
                flash.set_form(FormData {
                    name: Some(form.name.trim().to_string()),
                    email: Some(form.email.trim().to_string()),
                });
                Ok(redirect_to(Page::Register))
            }
        },

        Action::Login(form) => match auth::login(&mut session.state, &form) {
            Ok(user) => {
                session
                    .state
                    .flash
                    .set_success(format!("Welcome back, {}!", user.name));
                Ok(redirect_to(Page::Dashboard))
            }
            Err(err) => {
                let flash = &mut session.state.flash;
                flash.set_error(err.into_messages()?);
                flash.set_form(FormData {
                    name: None,
                    email: Some(form.email.trim().to_string()),
                });
                Ok(redirect_to(Page::Login))
            }
        },

        Action::Logout => {
            let name = auth::logout(session).await?.unwrap_or_else(|| "User".to_string());
            session
                .state
                .flash
                .set_success(format!("Goodbye, {name}! You have been logged out"));
            Ok(redirect_to(Page::Landing))
        }

        Action::CreateTicket(form) => {
            let Some(owner) = session.state.user_id else {
                return Ok(login_required(session, "create"));
            };
            let outcome = tickets::create(&mut session.state.tickets, owner, &form);
            flash_outcome(session, outcome, "Ticket created successfully!")?;
            Ok(redirect_to(Page::Tickets))
        }

        Action::UpdateTicket { ticket_id, form } => {
            let Some(owner) = session.state.user_id else {
                return Ok(login_required(session, "update"));
            };
            match tickets::update(&mut session.state.tickets, ticket_id, owner, &form) {
                Ok(_) => {
                    session.state.flash.set_success("Ticket updated successfully!");
                    Ok(redirect_to(Page::Tickets))
                }
                Err(err @ ApiError::Validation(_)) => {
                    session.state.flash.set_error(err.into_messages()?);
                    Ok(redirect_to_edit(ticket_id))
                }
                Err(err) => {
                    session.state.flash.set_error(err.into_messages()?);
                    Ok(redirect_to(Page::Tickets))
                }
            }
        }

        Action::DeleteTicket { ticket_id } => {
            let Some(owner) = session.state.user_id else {
                return Ok(login_required(session, "delete"));
            };
            let outcome = tickets::delete(&mut session.state.tickets, ticket_id, owner);
            flash_outcome(session, outcome, "Ticket deleted successfully!")?;
            Ok(redirect_to(Page::Tickets))
        }
    }
}

fn login_required(session: &mut SessionContext, verb: &str) -> Redirect {
    debug!("Rejected anonymous {} ticket action", verb);
    session
        .state
        .flash
        .set_error(vec![format!("Please login to {verb} tickets")]);
    redirect_to(Page::Login)
}

fn flash_outcome<T>(
    session: &mut SessionContext,
    outcome: Result<T, ApiError>,
    success: &str,
) -> Result<(), ApiError> {
    match outcome {
        Ok(_) => session.state.flash.set_success(success),
        Err(err) => session.state.flash.set_error(err.into_messages()?),
    }
    Ok(())
}

/// Drains the flash and renders `query.page`. Unknown pages are a 404.
fn render_page(state: &AppState, session: &mut SessionContext, query: &PageQuery) -> Response {
    let flash = session.state.flash.take();

    let Ok(page) = query.page_name().parse::<Page>() else {
        return ApiError::PageNotFound.into_response();
    };

    let user = session.state.current_user().map(|record| record.to_user());
    let view = match (page, user) {
        (Page::Landing, _) => View::Landing(LandingView {
            success: flash.success,
        }),
        (Page::Login | Page::Register, _) => {
            let form = AuthFormView {
                error: flash.error,
                success: flash.success,
                form: flash.form.unwrap_or_default(),
            };
            if page == Page::Login {
                View::Login(form)
            } else {
                View::Register(form)
            }
        }
        (Page::Dashboard, Some(user)) => View::Dashboard(DashboardView {
            stats: tickets::stats(&session.state.tickets, user.id),
            user,
            success: flash.success,
        }),
        (Page::Tickets, Some(user)) => {
            let book = &session.state.tickets;
            View::Tickets(TicketsView {
                tickets: tickets::list(book, user.id),
                edit_ticket: query
                    .edit_id()
                    .and_then(|id| tickets::find(book, id, user.id)),
                user,
                error: flash.error,
                success: flash.success,
            })
        }
        (Page::Dashboard | Page::Tickets, None) => {
            return ApiError::Unauthenticated.into_response();
        }
    };

    Html(state.renderer.render(&view)).into_response()
}
