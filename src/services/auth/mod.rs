pub mod basic;

pub use basic::BasicAuthenticator;
