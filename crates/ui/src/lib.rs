#![forbid(unsafe_code)]

pub mod flash;
pub mod render;
pub mod views;
pub mod vm;

pub use flash::{Flash, FlashLevel};
pub use render::{
    render_dashboard, render_error, render_login, render_quest, render_quest_list,
    render_register,
};
pub use vm::PageChrome;
