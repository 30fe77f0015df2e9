use dioxus::prelude::*;

use crate::vm::PageChrome;

const STYLE: &str = r"
body { font-family: sans-serif; margin: 0; background: #f6f7fb; color: #222; }
.topbar { display: flex; justify-content: space-between; align-items: center; padding: 12px 24px; background: #3b5bdb; }
.topbar a, .topbar span { color: #fff; text-decoration: none; margin-left: 16px; }
.content { max-width: 720px; margin: 24px auto; padding: 0 16px; }
.flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 12px; }
.flash-success { background: #d3f9d8; }
.flash-danger { background: #ffe3e3; }
.field-error { color: #c92a2a; font-size: 0.9em; margin: 4px 0; }
.quest-list li { margin: 8px 0; }
.done { color: #2b8a3e; }
.grade-current { font-weight: bold; }
footer { text-align: center; color: #868e96; padding: 24px 0; }
";

#[component]
pub fn Layout(chrome: PageChrome, children: Element) -> Element {
    rsx! {
        html { lang: "ru",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{chrome.title} · Математические квесты" }
                style { dangerous_inner_html: STYLE }
            }
            body {
                header { class: "topbar",
                    a { href: "/", "Математические квесты" }
                    if let Some(username) = chrome.username.clone() {
                        nav {
                            span { class: "whoami", "{username}" }
                            a { href: "/dashboard", "Кабинет" }
                            a { href: "/logout", "Выйти" }
                        }
                    }
                }
                main { class: "content",
                    for flash in chrome.flashes.iter() {
                        div { class: flash.class, "{flash.message}" }
                    }
                    {children}
                }
                footer { "© {chrome.current_year} Математические квесты" }
            }
        }
    }
}
