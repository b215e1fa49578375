pub mod data_panel;
pub mod integration;
