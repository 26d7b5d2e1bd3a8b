pub mod command_handlers;
pub mod dispatcher;
pub mod main_types;
pub mod render;
