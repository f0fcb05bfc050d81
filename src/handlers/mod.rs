pub mod draw;
pub mod prizes;
pub mod roster;
pub mod session;

pub use draw::draw_config;
pub use prizes::prizes_config;
pub use roster::roster_config;
pub use session::session_config;
