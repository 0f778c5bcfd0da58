use std::marker::PhantomData;

use sensitive_info::{render, Sensitive};

#[derive(Sensitive)]
struct Wrapper<T, L, M> {
    #[sensitive(text, visibility = 2)]
    secret: T,
    label: L,
    _marker: PhantomData<M>,
}

// Neither `Debug` nor `SensitiveValue`: only used through `PhantomData`.
struct Marker;

fn main() {
    let wrapper: Wrapper<String, u8, Marker> = Wrapper {
        secret: "hunter2".to_string(),
        label: 1,
        _marker: PhantomData,
    };
    assert!(render(&wrapper).starts_with(r#"Wrapper { secret: "***r2", label: 1"#));
}
