use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::PageChrome;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorPageProps {
    pub chrome: PageChrome,
    pub status: u16,
    pub message: String,
}

#[allow(non_snake_case)]
pub fn ErrorPage(props: ErrorPageProps) -> Element {
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "Ошибка {props.status}" }
            p { "{props.message}" }
            p {
                a { href: "/", "На главную" }
            }
        }
    }
}
