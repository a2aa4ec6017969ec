// Domain layer - Value types for the conditions dashboard
pub mod chart;
pub mod conditions;
pub mod destination;
pub mod document;
pub mod fixed;
pub mod forecast;
pub mod palette;
