use sealant_derive::sealant_error;
use std::borrow::Cow;

#[sealant_error]
pub enum CycleError {
    #[fatal]
    #[error("Scope cycle{}: {declaration}", format_context(.context))]
    Cycle { declaration: String, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = CycleError::Cycle { declaration: "a.A".to_owned(), context: None };
    assert!(err.is_fatal());
    assert_eq!(err.declaration(), Some("a.A"));
}
