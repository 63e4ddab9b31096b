//! Small helpers shared by the page renderer and the build.

pub mod date;
pub mod minify;
