pub mod buttons;
pub mod click;
pub mod download;
pub mod list;
pub mod message;
pub mod output;
