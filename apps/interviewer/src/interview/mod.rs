// Mock interview core: the session state machine, its progression rules, and
// the scorecard it aggregates. Content generation lives behind `gateway::Gateway`.

pub mod handlers;
pub mod messages;
pub mod models;
pub mod progression;
pub mod scorecard;
pub mod session;

pub use session::{InterviewError, Session};
