//! Compose label accessors.
//!
//! Docker compose tags every container it starts with the project it belongs
//! to. Only three keys are read; an absent or empty label is reported as
//! `None`.

use crate::env::labels::{COMPOSE_CONFIG_FILES, COMPOSE_PROJECT, COMPOSE_WORKING_DIR};
use std::collections::HashMap;

/// Anything that carries string labels.
pub trait LabelSource {
    /// Raw label value for `key`.
    fn label(&self, key: &str) -> Option<&str>;
}

impl LabelSource for HashMap<String, String> {
    fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

fn non_empty<'a, S: LabelSource + ?Sized>(source: &'a S, key: &str) -> Option<&'a str> {
    source.label(key).filter(|value| !value.is_empty())
}

/// Compose project name.
pub fn project_name<S: LabelSource + ?Sized>(source: &S) -> Option<&str> {
    non_empty(source, COMPOSE_PROJECT)
}

/// Compose config file path(s) of the project.
pub fn config_file<S: LabelSource + ?Sized>(source: &S) -> Option<&str> {
    non_empty(source, COMPOSE_CONFIG_FILES)
}

/// Compose working directory of the project.
pub fn config_dir<S: LabelSource + ?Sized>(source: &S) -> Option<&str> {
    non_empty(source, COMPOSE_WORKING_DIR)
}
