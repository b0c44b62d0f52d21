//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod badge;
pub mod challenge;
pub mod completion;
pub mod user;

pub use badge::*;
pub use challenge::*;
pub use completion::*;
pub use user::*;
