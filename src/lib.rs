//! Core library for the mentor-tools command line application.
//!
//! The mentors sheet of a workbook is read by [`io::excel_read`], each row is
//! turned into a [`model::MentorRecord`] by the helpers in [`normalize`] and
//! [`assemble`], and the result is written as YAML by [`io::yaml`]. The
//! [`sync`] module ties the steps together for the full and append modes.

pub mod assemble;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod normalize;
pub mod sync;

pub use error::{Result, ToolError};
