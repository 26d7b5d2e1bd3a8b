pub mod classifier;
pub mod domain;
pub mod repositories;
pub mod result;
pub mod services;
pub mod state;
pub mod viewmodels;
