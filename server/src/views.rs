//! HTML rendering. Templates are compiled into the binary.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::models::booking::Booking;
use crate::models::event::Event;
use crate::models::manager::ManagerIdentity;
use crate::models::site_settings::{SiteSettings, SiteSettingsRevision};
use crate::utils::error::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("attendee.html", include_str!("../templates/attendee.html")),
    ("auth-fail.html", include_str!("../templates/auth-fail.html")),
    ("buy-ticket.html", include_str!("../templates/buy-ticket.html")),
    ("create-event.html", include_str!("../templates/create-event.html")),
    ("edit-event.html", include_str!("../templates/edit-event.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("organiser.html", include_str!("../templates/organiser.html")),
    ("purchase-fail.html", include_str!("../templates/purchase-fail.html")),
    ("purchase-pass.html", include_str!("../templates/purchase-pass.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("site-setting.html", include_str!("../templates/site-setting.html")),
];

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<Html<String>, AppError> {
        let context = Context::from_serialize(data)?;
        Ok(Html(self.tera.render(template, &context)?))
    }

    /// For pages that need no data.
    pub fn render_static(&self, template: &str) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(template, &Context::new())?))
    }
}

/// An event plus its attendee-facing date.
#[derive(Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub formatted_date: String,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        let formatted_date = event.display_date();
        Self {
            event,
            formatted_date,
        }
    }
}

fn event_views(events: Vec<Event>) -> Vec<EventView> {
    events.into_iter().map(EventView::from).collect()
}

#[derive(Serialize)]
pub struct DashboardView {
    pub manager: ManagerIdentity,
    pub site_name: String,
    pub site_description: String,
    pub events: Vec<EventView>,
}

impl DashboardView {
    pub fn new(manager: ManagerIdentity, settings: SiteSettings, events: Vec<Event>) -> Self {
        Self {
            manager,
            site_name: settings.site_name,
            site_description: settings.site_description,
            events: event_views(events),
        }
    }
}

#[derive(Serialize)]
pub struct AttendeeView {
    pub site_name: String,
    pub site_description: String,
    pub events: Vec<EventView>,
}

impl AttendeeView {
    pub fn new(settings: SiteSettings, events: Vec<Event>) -> Self {
        Self {
            site_name: settings.site_name,
            site_description: settings.site_description,
            events: event_views(events),
        }
    }
}

#[derive(Serialize)]
pub struct SettingsView {
    pub site_name: String,
    pub site_description: String,
    pub history: Vec<SiteSettingsRevision>,
}

#[derive(Serialize)]
pub struct EditEventView {
    pub event: EventView,
    pub bookings: Vec<Booking>,
    pub tickets_sold: i64,
}

impl EditEventView {
    pub fn new(event: Event, bookings: Vec<Booking>) -> Self {
        let tickets_sold = bookings.iter().map(|b| b.tickets_booked).sum();
        Self {
            event: event.into(),
            bookings,
            tickets_sold,
        }
    }
}

#[derive(Serialize)]
pub struct BuyTicketView {
    pub event: EventView,
}
