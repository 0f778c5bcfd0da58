use sensitive_info::{render, Sensitive};

#[derive(Sensitive)]
enum Credential {
    Password(#[sensitive(text)] String),
    Token {
        #[sensitive(text, visibility = 4)]
        value: String,
        scope: &'static str,
    },
    Anonymous,
}

#[derive(Sensitive)]
enum Never {}

fn main() {
    assert_eq!(render(&Credential::Password("p".into())), r#"Password("***")"#);
    assert_eq!(
        render(&Credential::Token {
            value: "abcdef123456".into(),
            scope: "read",
        }),
        r#"Token { value: "***3456", scope: "read" }"#
    );
    assert_eq!(render(&Credential::Anonymous), "Anonymous");
    let _ = std::mem::size_of::<Never>();
}
