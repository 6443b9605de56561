pub mod account;
pub mod catalog;
pub mod crud;
pub mod employee;
pub mod leave;
