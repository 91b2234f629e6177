//! moodiary - Personal mood diary
//!
//! Records one mood (and an optional note) per day, or several timed entries
//! per day, and derives calendar, trend and chart views from the stored
//! entries. Remote changes are merged through a change channel with
//! last-write-wins on the entry's update stamp.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MoodiaryError;
