pub mod booking;
pub mod event;
pub mod manager;
pub mod site_settings;
