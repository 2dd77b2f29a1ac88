pub mod detail;
pub mod grid;
pub mod projects;
pub mod setup;
pub mod ui;
