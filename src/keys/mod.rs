pub mod identity;
pub mod inventory;
pub mod paths;
pub mod reproject;
pub mod run;
