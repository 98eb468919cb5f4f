pub mod databases;
pub mod login;
