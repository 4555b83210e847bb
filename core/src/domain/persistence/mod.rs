pub mod services;

pub use services::{Backend, PersistenceFacade};
