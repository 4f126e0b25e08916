pub mod auth;
pub mod purchase;

pub use auth::AuthService;
pub use purchase::{PurchaseOutcome, PurchaseRejection, TicketPurchaseEngine};
