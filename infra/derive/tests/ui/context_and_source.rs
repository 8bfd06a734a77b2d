use hustler_derive::hustler_error;
use std::borrow::Cow;

#[hustler_error]
pub enum FetchError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> FetchResult<()> {
    Err(std::io::Error::other("disk gone")).context("Reading cache")
}

fn main() {
    let _ = read();
    let _: FetchError = "boom".into();
}
