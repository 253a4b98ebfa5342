pub mod db;
pub mod migrations;
pub mod plans;
pub mod sessions;
pub mod sets;
