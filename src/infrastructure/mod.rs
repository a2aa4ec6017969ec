// Infrastructure layer - External dependencies and adapters
pub mod chunked_updates;
pub mod config;
pub mod file_preference_store;
pub mod html_response;
pub mod http_conditions_api;
pub mod page_renderer;
