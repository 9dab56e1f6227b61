pub mod commands;
pub mod error;
pub mod guard;
pub mod paths;
pub mod platform;
pub mod sets;
pub mod settings;
pub mod switch;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
