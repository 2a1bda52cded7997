// Two security tiers: public (token acquisition, registration) and
// protected (everything behind the JWT middleware).
pub mod protected;
pub mod public;
