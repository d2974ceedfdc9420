pub mod cli;
pub mod console;
pub mod data_paths;
pub mod logging;
pub mod portfolio;
pub mod prices;
pub mod store;
