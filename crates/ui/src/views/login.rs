use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::PageChrome;

#[derive(Props, Clone, PartialEq)]
pub struct LoginPageProps {
    pub chrome: PageChrome,
}

#[allow(non_snake_case)]
pub fn LoginPage(props: LoginPageProps) -> Element {
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "Вход" }
            form { method: "post", action: "/login", class: "auth-form",
                p {
                    label { r#for: "username", "Имя пользователя" }
                    input { r#type: "text", id: "username", name: "username", required: true }
                }
                p {
                    label { r#for: "password", "Пароль" }
                    input { r#type: "password", id: "password", name: "password", required: true }
                }
                button { r#type: "submit", "Войти" }
            }
            p {
                "Нет аккаунта? "
                a { href: "/register", "Зарегистрироваться" }
            }
        }
    }
}
