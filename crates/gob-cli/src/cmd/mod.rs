pub mod config;
pub mod customer;
pub mod hc;
pub mod ticket;
pub mod tree;
pub mod wu;
