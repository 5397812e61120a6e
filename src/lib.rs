pub mod apis;
pub mod arguments;
pub mod audit;
pub mod config;
pub mod logger;
pub mod paths;
pub mod portal;
pub mod webserver;
