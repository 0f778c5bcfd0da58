// The derive only emits absolute paths, so local items named like the
// crate's types must not interfere.
#![allow(dead_code)]

struct FieldRule;
struct FieldSchema;
struct SensitivitySchema;
trait SensitiveType {}
mod core {}

#[derive(sensitive_info::Sensitive)]
struct Shadowed {
    #[sensitive(email)]
    email: String,
}

fn main() {
    let value = Shadowed {
        email: "a@b.io".into(),
    };
    assert_eq!(format!("{value:?}"), r#"Shadowed { email: "***@b.io" }"#);
}
