// Protected handlers (JWT authentication required)

pub mod combos;
pub mod seats;
pub mod sessions;
pub mod tickets;
pub mod users;
