use std::fmt;

use sensitive_info::{mask, Sensitive};

mod render {
    use super::*;

    pub fn session(session: &Session, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &mask::text(&session.token))
            .finish()
    }
}

#[derive(Sensitive)]
#[sensitive(render_with = "render::session")]
pub struct Session {
    token: String,
}

fn main() {
    let session = Session {
        token: "abc".into(),
    };
    assert_eq!(format!("{session:?}"), r#"Session { token: "***" }"#);
    assert_eq!(session.to_string(), r#"Session { token: "***" }"#);
}
