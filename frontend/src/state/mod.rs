pub mod columns;
pub mod dashboard;
pub mod filters;
pub mod hours;
pub mod messages;
pub mod session;
pub mod table;

pub use dashboard::{Dashboard, LoadOutcome, LoadTicket, Tab};
