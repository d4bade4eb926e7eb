//! Backend bridge: the worker thread that owns the controller and the HTTP gateway.

pub mod commands;
pub mod runtime;
