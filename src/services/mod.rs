pub mod chat_service;
pub mod chatbot;
pub mod follow_ups;
pub mod history_store;
pub mod metrics_manager;
pub mod patterns;
