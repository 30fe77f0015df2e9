use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::{DashboardVm, GradeCardVm, PageChrome};

#[derive(Props, Clone, PartialEq)]
pub struct DashboardPageProps {
    pub chrome: PageChrome,
    pub dashboard: DashboardVm,
}

#[allow(non_snake_case)]
pub fn DashboardPage(props: DashboardPageProps) -> Element {
    let data = props.dashboard;
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "Привет, {data.username}!" }
            p { "С нами с {data.member_since}" }
            match data.current_grade {
                Some(grade) => rsx! {
                    p { "Текущий класс: {grade}" }
                },
                None => rsx! {
                    p { "Выбери свой класс, чтобы начать." }
                },
            }
            p { "Решено заданий: {data.completed_total}" }
            h2 { "Классы" }
            ul { class: "grades",
                for card in data.grades {
                    GradeCard { card }
                }
            }
        }
    }
}

#[component]
fn GradeCard(card: GradeCardVm) -> Element {
    let class = if card.is_current { "grade-current" } else { "" };
    rsx! {
        li { class: "{class}",
            a { href: "{card.href}", "{card.grade} класс" }
            ": {card.completed} из {card.total}"
        }
    }
}
