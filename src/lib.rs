//! Playbook Browser — terminal browser for a categorized anti-pattern
//! playbook with free-text search and quote detail views.

pub mod app;
pub mod event;
pub mod loader;
pub mod model;
pub mod search;
pub mod theme;
pub mod view;
