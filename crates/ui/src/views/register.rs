use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::{FormVm, PageChrome};

#[derive(Props, Clone, PartialEq)]
pub struct RegisterPageProps {
    pub chrome: PageChrome,
    pub form: FormVm,
}

#[allow(non_snake_case)]
pub fn RegisterPage(props: RegisterPageProps) -> Element {
    let form = props.form;
    rsx! {
        Layout { chrome: props.chrome,
            h1 { "Регистрация" }
            form { method: "post", action: "/register", class: "auth-form",
                p {
                    label { r#for: "username", "Имя пользователя" }
                    input {
                        r#type: "text",
                        id: "username",
                        name: "username",
                        value: "{form.username}",
                        required: true,
                    }
                    FieldErrors { messages: form.username_errors.clone() }
                }
                p {
                    label { r#for: "password", "Пароль" }
                    input { r#type: "password", id: "password", name: "password", required: true }
                    FieldErrors { messages: form.password_errors.clone() }
                }
                button { r#type: "submit", "Зарегистрироваться" }
            }
            p {
                "Уже есть аккаунт? "
                a { href: "/", "Войти" }
            }
        }
    }
}

#[component]
fn FieldErrors(messages: Vec<String>) -> Element {
    rsx! {
        for message in messages.iter() {
            p { class: "field-error", "{message}" }
        }
    }
}
