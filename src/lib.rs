pub mod config;
pub mod controller;
pub mod fetch;
pub mod loader;
pub mod marker;
pub mod output;
pub mod publish;
pub mod scale;
pub mod slider;
pub mod stats;
pub mod time_filter;
pub mod traffic;
pub mod types;
pub mod view;
