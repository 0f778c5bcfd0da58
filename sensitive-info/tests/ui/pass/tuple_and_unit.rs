use sensitive_info::{render, Sensitive};

#[derive(Sensitive)]
struct Pin(#[sensitive(number)] u16);

#[derive(Sensitive)]
struct Pair(String, #[sensitive(email)] String);

#[derive(Sensitive)]
struct Empty;

fn main() {
    assert_eq!(render(&Pin(1234)), r#"Pin("****")"#);
    assert_eq!(
        render(&Pair("a".into(), "a@b.io".into())),
        r#"Pair("a", "***@b.io")"#
    );
    assert_eq!(render(&Empty), "Empty");
}
