pub mod analysis;
pub mod build;
pub mod part;
pub mod upgrade;
