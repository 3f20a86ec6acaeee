use super::*;

mod catalog;
mod edit;
mod import;
mod note;
mod remove;
