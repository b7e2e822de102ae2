//! Rule-based storefront support chatbot: reply selection, follow-up
//! suggestions, per-identity chat history and the widget state machine
//! that drives the chat window.

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
pub mod widget;
