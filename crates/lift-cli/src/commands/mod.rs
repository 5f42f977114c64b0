pub mod add;
pub mod auth;
pub mod chart;
pub mod clear;
pub mod delete;
pub mod dispatch;
pub mod exercises;
pub mod export;
pub mod import;
pub mod list;
pub mod sync;
