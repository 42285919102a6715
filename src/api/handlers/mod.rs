//! HTTP endpoint handlers organized by concern.

pub mod pages;
pub mod stations;
pub mod system;
pub mod task;
