// Public handlers (no authentication required)

pub mod login;
pub mod register;

pub use login::login_post;
pub use register::user_post;
