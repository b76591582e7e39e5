pub mod action;
pub mod change;
pub mod count;
pub mod message;
pub mod path;
