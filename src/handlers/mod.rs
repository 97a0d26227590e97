pub mod bootstrap;
pub mod dev;
pub mod health;
pub mod services;
pub mod staff;
