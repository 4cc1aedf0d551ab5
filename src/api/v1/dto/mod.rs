pub mod decision;
pub mod signup;
