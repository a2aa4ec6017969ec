// Application layer - Widget use cases and the seams they depend on
pub mod conditions_api;
pub mod dashboard_service;
pub mod fullscreen_service;
pub mod preference_store;
pub mod streaming_service;
