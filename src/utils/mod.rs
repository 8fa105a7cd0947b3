pub mod constants;
pub mod db_connect;
pub mod env;
pub mod mapping_config;
