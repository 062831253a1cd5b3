use std::borrow::Cow;

#[sealant_derive::sealant_error]
pub enum DomainError {
    /// A dotted name that cannot denote a class.
    #[error("Invalid class name '{declaration}'{}: {message}", format_context(.context))]
    InvalidClassName {
        declaration: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown feature{}: {message}", format_context(.context))]
    UnknownFeature { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
