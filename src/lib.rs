//! Medexam Workflow - submission workflow core for clinic medical examinations
//!
//! This crate owns the state and policy behind the exam submission wizard:
//! unsaved-changes navigation guarding, role and status permissions, section
//! completion, the conditional cognitive assessment, and draft persistence.
//! Rendering, HTTP and browser history are reached through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
