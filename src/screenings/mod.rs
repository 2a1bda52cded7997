//! Screening ("sessao") scheduling: the validator that guards creates and
//! updates, and the store it runs against.

pub mod store;
pub mod validator;
