//! Server-side rendering of full pages to HTML strings.

use dioxus::dioxus_core::Properties;
use dioxus::prelude::*;

use crate::views::{
    DashboardPage, DashboardPageProps, ErrorPage, ErrorPageProps, LoginPage, LoginPageProps,
    QuestListPage, QuestListPageProps, QuestPage, QuestPageProps, RegisterPage,
    RegisterPageProps,
};
use crate::vm::{DashboardVm, FormVm, PageChrome, QuestDetailVm, QuestListVm};

fn render_root<P: Properties>(root: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(root, props);
    dom.rebuild_in_place();
    let mut html = String::from("<!DOCTYPE html>");
    html.push_str(&dioxus_ssr::render(&dom));
    html
}

#[must_use]
pub fn render_login(chrome: PageChrome) -> String {
    render_root(LoginPage, LoginPageProps { chrome })
}

#[must_use]
pub fn render_register(chrome: PageChrome, form: FormVm) -> String {
    render_root(RegisterPage, RegisterPageProps { chrome, form })
}

#[must_use]
pub fn render_dashboard(chrome: PageChrome, dashboard: DashboardVm) -> String {
    render_root(DashboardPage, DashboardPageProps { chrome, dashboard })
}

#[must_use]
pub fn render_quest_list(chrome: PageChrome, list: QuestListVm) -> String {
    render_root(QuestListPage, QuestListPageProps { chrome, list })
}

#[must_use]
pub fn render_quest(chrome: PageChrome, quest: QuestDetailVm) -> String {
    render_root(QuestPage, QuestPageProps { chrome, quest })
}

#[must_use]
pub fn render_error(chrome: PageChrome, status: u16, message: impl Into<String>) -> String {
    render_root(
        ErrorPage,
        ErrorPageProps {
            chrome,
            status,
            message: message.into(),
        },
    )
}
