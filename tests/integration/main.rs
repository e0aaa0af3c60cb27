//! Integration tests for setup-angle

mod action;
mod cli;
