pub mod choose;
pub mod confirm;
pub mod pages;
pub mod survey;
pub mod wait;
