pub mod application;
pub mod auth;
pub mod community;
pub mod connection;
pub mod docs;
pub mod job;
pub mod profile;
