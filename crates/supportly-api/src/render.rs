use std::fmt::Write;

use supportly_types::models::{Ticket, TicketStatus};
use supportly_types::views::{AuthFormView, DashboardView, LandingView, TicketsView, View};

/// Turns a view-model into markup. Implementations must be pure.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> String;
}

/// Bare HTML pages with the forms each view needs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View) -> String {
        let (title, body) = match view {
            View::Landing(v) => ("Supportly", landing(v)),
            View::Login(v) => ("Login", login(v)),
            View::Register(v) => ("Register", register(v)),
            View::Dashboard(v) => ("Dashboard", dashboard(v)),
            View::Tickets(v) => ("Tickets", tickets(v)),
        };
        layout(title, &body)
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn notices(out: &mut String, error: &[String], success: Option<&str>) {
    if !error.is_empty() {
        out.push_str("<ul class=\"flash error\">\n");
        for message in error {
            let _ = writeln!(out, "<li>{}</li>", escape(message));
        }
        out.push_str("</ul>\n");
    }
    if let Some(message) = success {
        let _ = writeln!(out, "<p class=\"flash success\">{}</p>", escape(message));
    }
}

fn landing(view: &LandingView) -> String {
    let mut out = String::new();
    notices(&mut out, &[], view.success.as_deref());
    out.push_str("<h1>Supportly</h1>\n");
    out.push_str("<p><a href=\"/?page=login\">Login</a> | <a href=\"/?page=register\">Get started</a></p>\n");
    out
}

fn login(view: &AuthFormView) -> String {
    let mut out = String::new();
    notices(&mut out, &view.error, view.success.as_deref());
    let email = view.form.email.as_deref().unwrap_or_default();
    let _ = write!(
        out,
        "<h1>Login</h1>\n\
         <form method=\"post\" action=\"/?page=login\">\n\
         <input type=\"hidden\" name=\"action\" value=\"login\">\n\
         <input type=\"email\" name=\"email\" value=\"{}\">\n\
         <input type=\"password\" name=\"password\">\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n",
        escape(email)
    );
    out
}

fn register(view: &AuthFormView) -> String {
    let mut out = String::new();
    notices(&mut out, &view.error, view.success.as_deref());
    let name = view.form.name.as_deref().unwrap_or_default();
    let email = view.form.email.as_deref().unwrap_or_default();
    let _ = write!(
        out,
        "<h1>Register</h1>\n\
         <form method=\"post\" action=\"/?page=register\">\n\
         <input type=\"hidden\" name=\"action\" value=\"register\">\n\
         <input type=\"text\" name=\"name\" value=\"{}\">\n\
         <input type=\"email\" name=\"email\" value=\"{}\">\n\
         <input type=\"password\" name=\"password\">\n\
         <input type=\"password\" name=\"confirm_password\">\n\
         <button type=\"submit\">Create account</button>\n\
         </form>\n",
        escape(name),
        escape(email)
    );
    out
}

fn logout_form(out: &mut String) {
    out.push_str(
        "<form method=\"post\" action=\"/\">\
         <input type=\"hidden\" name=\"action\" value=\"logout\">\
         <button type=\"submit\">Logout</button></form>\n",
    );
}

fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    notices(&mut out, &[], view.success.as_deref());
    let _ = writeln!(out, "<h1>Welcome, {}</h1>", escape(&view.user.name));
    let _ = writeln!(
        out,
        "<dl class=\"stats\"><dt>Total</dt><dd>{}</dd><dt>Open</dt><dd>{}</dd>\
         <dt>Ongoing</dt><dd>{}</dd><dt>Resolved</dt><dd>{}</dd></dl>",
        view.stats.total, view.stats.open, view.stats.ongoing, view.stats.resolved
    );
    out.push_str("<p><a href=\"/?page=tickets\">Manage tickets</a></p>\n");
    logout_form(&mut out);
    out
}

fn status_select(out: &mut String, selected: TicketStatus) {
    out.push_str("<select name=\"status\">");
    for status in TicketStatus::ALL {
        let marker = if status == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{status}\"{marker}>{status}</option>");
    }
    out.push_str("</select>\n");
}

fn ticket_form(out: &mut String, editing: Option<&Ticket>) {
    let (action, title, description, status) = match editing {
        Some(t) => ("update_ticket", t.title.as_str(), t.description.as_str(), t.status),
        None => ("create_ticket", "", "", TicketStatus::Open),
    };
    let _ = writeln!(out, "<form method=\"post\" action=\"/?page=tickets\">");
    let _ = writeln!(out, "<input type=\"hidden\" name=\"action\" value=\"{action}\">");
    if let Some(t) = editing {
        let _ = writeln!(out, "<input type=\"hidden\" name=\"ticket_id\" value=\"{}\">", t.id);
    }
    let _ = writeln!(out, "<input type=\"text\" name=\"title\" value=\"{}\">", escape(title));
    let _ = writeln!(out, "<textarea name=\"description\">{}</textarea>", escape(description));
    status_select(out, status);
    let label = if editing.is_some() { "Save" } else { "Create ticket" };
    let _ = writeln!(out, "<button type=\"submit\">{label}</button>\n</form>");
}

fn tickets(view: &TicketsView) -> String {
    let mut out = String::new();
    notices(&mut out, &view.error, view.success.as_deref());
    let _ = writeln!(out, "<h1>Tickets for {}</h1>", escape(&view.user.name));
    ticket_form(&mut out, view.edit_ticket.as_ref());

    if view.tickets.is_empty() {
        out.push_str("<p>No tickets yet.</p>\n");
    } else {
        out.push_str("<ul class=\"tickets\">\n");
        for ticket in &view.tickets {
            let _ = writeln!(
                out,
                "<li data-id=\"{id}\"><strong>{title}</strong> [{status}] {description} \
                 <a href=\"/?page=tickets&amp;edit={id}\">Edit</a>\
                 <form method=\"post\" action=\"/?page=tickets\">\
                 <input type=\"hidden\" name=\"action\" value=\"delete_ticket\">\
                 <input type=\"hidden\" name=\"ticket_id\" value=\"{id}\">\
                 <button type=\"submit\">Delete</button></form></li>",
                id = ticket.id,
                title = escape(&ticket.title),
                status = ticket.status,
                description = escape(&ticket.description),
            );
        }
        out.push_str("</ul>\n");
    }
    logout_form(&mut out);
    out
}
