pub mod config;
pub mod confirm;
pub mod customer;
pub mod error;
pub mod github;
pub mod health_check;
pub mod io;
pub mod paths;
pub mod ticket;
pub mod tree;
pub mod weekly;

pub use error::{GobError, Result};
