use hustler_derive::hustler_error;
use std::borrow::Cow;

#[hustler_error]
pub(crate) enum ReplyError {
    #[error("Rejected with status {status}{}", format_context(.context))]
    Rejected { status: u16, message: Option<String>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = ReplyError::Rejected { status: 409, message: None, context: None };
    let tagged: ReplyResult<()> = Err::<(), _>(err).context("Sending code");
    assert!(tagged.is_err());
}
