//! HTML rendering of the tracker page.
//!
//! Rendering never mutates state: it reads the session and the form draft it
//! is handed and produces markup.

use tripbook_core::{Booking, BookingDraft, BookingType, IndexedBooking, TripSession};
use uuid::Uuid;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; padding: 24px; color: #222; }
.layout { display: grid; grid-template-columns: 3fr 1fr; gap: 24px; }
form.booking label { display: block; margin-top: 10px; font-size: 0.85rem; }
form.booking input, form.booking select { width: 100%; padding: 6px; }
.notice { color: #1a7f37; }
.error { color: #cf222e; }
.bookings-box { border: 1px solid #e6e6e6; border-radius: 12px; padding: 14px; background-color: #fafafa; }
.booking-item { margin-bottom: 12px; padding-bottom: 10px; border-bottom: 1px dashed #ddd; }
.booking-item:last-child { border-bottom: none; margin-bottom: 0; }
.booking-type { font-size: 0.7rem; font-weight: 700; color: #6c757d; text-transform: uppercase; }
.booking-title { font-size: 0.95rem; font-weight: 600; }
.booking-date { font-size: 0.8rem; color: #555; }
.booking-actions form { display: inline; }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Housing,
}

impl ViewFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("housing") => ViewFilter::Housing,
            _ => ViewFilter::All,
        }
    }

    pub fn select(&self, session: &TripSession) -> Vec<IndexedBooking> {
        match self {
            ViewFilter::All => session.store.list_filtered(|_| true),
            ViewFilter::Housing => session.store.housing(),
        }
    }
}

/// The in-progress form plus any message to show above it
#[derive(Debug, Clone)]
pub struct PageForm {
    pub draft: BookingDraft,
    /// Booking the form saves into; `None` renders the add form
    pub editing: Option<Uuid>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl PageForm {
    /// Blank add form, or the edit form prefilled from the booking being edited
    pub fn for_session(session: &TripSession) -> Self {
        match session.editing_booking() {
            Some(booking) => Self {
                draft: BookingDraft::from_booking(booking),
                editing: Some(booking.id),
                error: None,
                notice: None,
            },
            None => Self {
                draft: BookingDraft::new(BookingType::Flight),
                editing: None,
                error: None,
                notice: None,
            },
        }
    }

    pub fn with_error(draft: BookingDraft, editing: Option<Uuid>, error: impl Into<String>) -> Self {
        Self { draft, editing, error: Some(error.into()), notice: None }
    }
}

pub fn render_page(session: &TripSession, form: &PageForm, filter: ViewFilter) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Trip Bookings Tracker</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str("<div class=\"layout\">\n<main>\n<h1>Trip Planner</h1>\n");
    html.push_str("<p>Add your trip bookings below. They appear in the summary panel on the right.</p>\n");

    if let Some(notice) = &form.notice {
        html.push_str(&format!("<p class=\"notice\">{}</p>\n", escape(notice)));
    }
    if let Some(error) = &form.error {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    let editing = form.editing.as_ref().and_then(|id| session.store.get(id));
    render_form(&mut html, editing, &form.draft);
    html.push_str("</main>\n<aside>\n");
    render_summary(&mut html, &filter.select(session), filter);
    html.push_str("</aside>\n</div>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, editing: Option<&Booking>, draft: &BookingDraft) {
    let (heading, action, submit) = match editing {
        Some(b) => ("Edit booking", format!("/bookings/{}", b.id), "Save changes"),
        None => ("Add a booking", "/bookings".to_string(), "Add booking"),
    };

    html.push_str(&format!("<h2>{heading}</h2>\n"));
    html.push_str(&format!("<form class=\"booking\" method=\"post\" action=\"{action}\">\n"));

    html.push_str("<label>Booking type <select name=\"type\">");
    for t in BookingType::ALL {
        let selected = if t == draft.booking_type { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", t.label(), selected));
    }
    html.push_str("</select></label>\n");

    text_input(html, "title", "Title (e.g. NYC → Paris, Hotel Name)", "text", &draft.title);
    text_input(html, "start_date", "Start date", "date", &draft.start_date);
    text_input(html, "end_date", "End date", "date", &draft.end_date);
    text_input(html, "details", "Extra details (optional)", "text", &draft.details);
    html.push_str("<fieldset><legend>Housing only</legend>\n");
    text_input(html, "link", "Listing link (Airbnb, Booking.com)", "url", &draft.link);
    text_input(html, "city", "City", "text", &draft.city);
    text_input(html, "price", "Price", "text", &draft.price);
    html.push_str("<button type=\"submit\" formaction=\"/bookings/suggest\">Suggest from link</button>\n");
    html.push_str("</fieldset>\n");

    html.push_str(&format!("<button type=\"submit\">{submit}</button>\n"));
    html.push_str("</form>\n");

    if editing.is_some() {
        html.push_str("<form method=\"post\" action=\"/edit/cancel\"><button type=\"submit\">Cancel</button></form>\n");
    }
}

fn text_input(html: &mut String, name: &str, label: &str, kind: &str, value: &str) {
    html.push_str(&format!(
        "<label>{} <input type=\"{kind}\" name=\"{name}\" value=\"{}\"></label>\n",
        escape(label),
        escape(value)
    ));
}

fn render_summary(html: &mut String, items: &[IndexedBooking], filter: ViewFilter) {
    html.push_str("<div class=\"bookings-box\">\n<h3>Bookings</h3>\n");
    let (all, housing) = match filter {
        ViewFilter::All => ("<strong>All</strong>", "<a href=\"/?view=housing\">Housing</a>"),
        ViewFilter::Housing => ("<a href=\"/\">All</a>", "<strong>Housing</strong>"),
    };
    html.push_str(&format!("<p>{all} | {housing}</p>\n"));

    if items.is_empty() {
        html.push_str("<p class=\"booking-date\">No bookings added yet.</p>\n");
    }
    for item in items {
        render_item(html, &item.booking);
    }
    html.push_str("</div>\n");
}

fn render_item(html: &mut String, b: &Booking) {
    html.push_str(&format!("<div class=\"booking-item\" id=\"booking-{}\">\n", b.id));
    html.push_str(&format!("<div class=\"booking-type\">{}</div>\n", b.booking_type));
    html.push_str(&format!("<div class=\"booking-title\">{}</div>\n", escape(&b.title)));
    if let Some(city) = &b.city {
        html.push_str(&format!("<div class=\"booking-date\">{}</div>\n", escape(city)));
    }
    html.push_str(&format!("<div class=\"booking-date\">{}</div>\n", escape(&b.date)));
    if let Some(details) = &b.details {
        html.push_str(&format!("<div class=\"booking-date\">{}</div>\n", escape(details)));
    }
    if let Some(price) = &b.price {
        html.push_str(&format!("<div class=\"booking-date\">Price: {}</div>\n", escape(price)));
    }
    if let Some(link) = &b.link {
        // Anything other than a web link is shown as plain text
        if is_web_link(link) {
            html.push_str(&format!(
                "<div class=\"booking-date\"><a href=\"{0}\" rel=\"noopener noreferrer\">{0}</a></div>\n",
                escape(link)
            ));
        } else {
            html.push_str(&format!("<div class=\"booking-date\">{}</div>\n", escape(link)));
        }
    }
    html.push_str(&format!(
        "<div class=\"booking-actions\">\
         <form method=\"post\" action=\"/bookings/{0}/edit\"><button type=\"submit\">Edit</button></form> \
         <form method=\"post\" action=\"/bookings/{0}/delete\"><button type=\"submit\">Delete</button></form>\
         </div>\n",
        b.id
    ));
    html.push_str("</div>\n");
}

fn is_web_link(link: &str) -> bool {
    let lower = link.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page() {
        let session = TripSession::new();
        let html = render_page(&session, &PageForm::for_session(&session), ViewFilter::All);
        assert!(html.contains("No bookings added yet."));
        assert!(html.contains("action=\"/bookings\""));
        assert!(!html.contains("/edit/cancel"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut session = TripSession::new();
        session
            .store
            .add(Booking::new(BookingType::Activity, "<script>alert(1)</script>", "2024-06-01"));
        let html = render_page(&session, &PageForm::for_session(&session), ViewFilter::All);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_edit_mode_prefills_form() {
        let mut session = TripSession::new();
        let id = session
            .store
            .add(Booking::new(BookingType::Train, "Eurostar", "2024-06-01 → 2024-06-02"));
        session.editing = Some(id);
        let html = render_page(&session, &PageForm::for_session(&session), ViewFilter::All);
        assert!(html.contains(&format!("action=\"/bookings/{id}\"")));
        assert!(html.contains("value=\"2024-06-02\""));
        assert!(html.contains("<option value=\"Train\" selected>"));
        assert!(html.contains("/edit/cancel"));
    }

    #[test]
    fn test_rejected_add_keeps_add_form_while_editing() {
        let mut session = TripSession::new();
        let id = session.store.add(Booking::new(BookingType::Train, "Eurostar", "2024-06-01"));
        session.editing = Some(id);

        let form = PageForm::with_error(BookingDraft::new(BookingType::Flight), None, "Title is required");
        let html = render_page(&session, &form, ViewFilter::All);
        assert!(html.contains("action=\"/bookings\""));
        assert!(!html.contains(&format!("action=\"/bookings/{id}\"")));
        assert!(html.contains("Add a booking"));
    }

    #[test]
    fn test_only_web_links_are_clickable() {
        let mut session = TripSession::new();
        let mut bad = Booking::new(BookingType::Housing, "Loft", "2024-06-01");
        bad.link = Some("javascript:alert(document.cookie)".to_string());
        let mut good = Booking::new(BookingType::Hotel, "Le Grand Paris", "2024-06-01");
        good.link = Some("https://www.booking.com/hotel/fr/le-grand-paris.html".to_string());
        session.store.add(bad);
        session.store.add(good);

        let html = render_page(&session, &PageForm::for_session(&session), ViewFilter::All);
        assert!(!html.contains("href=\"javascript:"));
        assert!(html.contains("javascript:alert(document.cookie)"));
        assert!(html.contains("href=\"https://www.booking.com/hotel/fr/le-grand-paris.html\""));
    }

    #[test]
    fn test_housing_filter() {
        let mut session = TripSession::new();
        session.store.add(Booking::new(BookingType::Flight, "JFK → CDG", "2024-06-01"));
        session.store.add(Booking::new(BookingType::Housing, "Loft", "2024-06-01"));
        let items = ViewFilter::Housing.select(&session);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].position, 1);
        let html = render_page(&session, &PageForm::for_session(&session), ViewFilter::Housing);
        assert!(html.contains("Loft"));
        assert!(!html.contains("JFK"));
    }
}
