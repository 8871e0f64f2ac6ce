mod auth;
mod selection;
mod trigger;

pub use auth::Authorizer;
pub use auth::TokenManager;
pub use selection::MAX_ATTEMPTS;
pub use selection::SelectionOptions;
pub use selection::find_unliked_track;
pub use trigger::PULSE_INTERVAL;
pub use trigger::pulse;
