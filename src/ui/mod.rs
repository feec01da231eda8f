pub(crate) mod app;
pub(crate) mod commands;
pub(crate) mod dialog;
pub(crate) mod prompter;
pub(crate) mod render;
pub(crate) mod screens;
pub(crate) mod theme;
pub(crate) mod util;


#[cfg(test)]
#[path = "dialog_tests.rs"]
mod dialog_tests;
