//! MCP server for Redash.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! Redash queries, dashboards, visualizations and alerts to AI assistants.

pub mod resources;
mod server;
pub mod tools;

pub use server::{RedashMcpServer, ServerError};
