use std::borrow::Cow;

use sensitive_info::{render, Sensitive};

#[derive(Sensitive)]
struct Borrowed<'a> {
    #[sensitive(email)]
    email: &'a str,
    #[sensitive(text, visibility = 1)]
    note: Cow<'a, str>,
    name: &'a str,
}

#[derive(Sensitive)]
struct Outer<'a, T> {
    inner: &'a Borrowed<'a>,
    #[sensitive(number)]
    id: T,
}

fn main() {
    let email = String::from("a@b.io");
    let borrowed = Borrowed {
        email: &email,
        note: Cow::Borrowed("xyz"),
        name: "n",
    };
    let outer = Outer {
        inner: &borrowed,
        id: 12_u8,
    };
    assert_eq!(
        render(&outer),
        r#"Outer { inner: Borrowed { email: "***@b.io", note: "***z", name: "n" }, id: "**" }"#
    );
}
