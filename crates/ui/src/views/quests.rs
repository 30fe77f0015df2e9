use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::{PageChrome, QuestListVm, QuestRowVm};

#[derive(Props, Clone, PartialEq)]
pub struct QuestListPageProps {
    pub chrome: PageChrome,
    pub list: QuestListVm,
}

#[allow(non_snake_case)]
pub fn QuestListPage(props: QuestListPageProps) -> Element {
    let list = props.list;
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "Задания для {list.grade} класса" }
            if list.rows.is_empty() {
                p { "Для этого класса пока нет заданий." }
            } else {
                p { "Выполнено: {list.completed} из {list.total}" }
                ul { class: "quest-list",
                    for row in list.rows {
                        QuestRow { row }
                    }
                }
            }
            p {
                a { href: "/dashboard", "← В кабинет" }
            }
        }
    }
}

#[component]
fn QuestRow(row: QuestRowVm) -> Element {
    rsx! {
        li {
            a { href: "{row.href}", "Задание {row.quest_id}: {row.description}" }
            if row.completed {
                span { class: "done", " ✓ выполнено" }
            }
        }
    }
}
