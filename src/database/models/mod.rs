pub mod combo;
pub mod screening;
pub mod seat;
pub mod ticket;
pub mod user;

pub use combo::Combo;
pub use screening::Screening;
pub use seat::Seat;
pub use ticket::Ticket;
pub use user::User;
