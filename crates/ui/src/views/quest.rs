use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::{PageChrome, QuestDetailVm};

#[derive(Props, Clone, PartialEq)]
pub struct QuestPageProps {
    pub chrome: PageChrome,
    pub quest: QuestDetailVm,
}

#[allow(non_snake_case)]
pub fn QuestPage(props: QuestPageProps) -> Element {
    let quest = props.quest;
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "{quest.description}" }
            p { class: "question", "{quest.question}" }
            form { method: "post", action: "{quest.action}",
                p {
                    label { r#for: "answer", "Твой ответ" }
                    input {
                        r#type: "text",
                        id: "answer",
                        name: "answer",
                        autocomplete: "off",
                        required: true,
                    }
                }
                button { r#type: "submit", "Проверить" }
            }
            p {
                a { href: "{quest.back_href}", "← К заданиям {quest.grade} класса" }
            }
        }
    }
}
