//! Field validation shared by every entity.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// A required field is missing or malformed.
///
/// `Display` yields the message shown to end users, so services can surface
/// it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    BlankEmail,
    MalformedEmail,
    BlankPassword,
    BlankNickname,
    BlankStreet,
    BlankDetail,
    BlankZipcode,
    BlankTitle,
    BlankContent,
    MissingPrice,
    NegativePrice,
    BlankComment,
}

impl ValidationError {
    /// User-facing message for this violation.
    pub fn message(self) -> &'static str {
        match self {
            Self::BlankEmail => "이메일을 입력해주세요.",
            Self::MalformedEmail => "올바른 이메일 형식이 아닙니다.",
            Self::BlankPassword => "비밀번호를 입력해주세요.",
            Self::BlankNickname => "닉네임을 입력해주세요.",
            Self::BlankStreet => "주소를 입력해주세요.",
            Self::BlankDetail => "상세주소를 입력해주세요.",
            Self::BlankZipcode => "우편번호를 입력해주세요.",
            Self::BlankTitle => "제목을 입력해주세요.",
            Self::BlankContent => "내용을 입력해주세요.",
            Self::MissingPrice => "가격을 입력해주세요.",
            Self::NegativePrice => "가격은 0원 이상이어야 합니다.",
            Self::BlankComment => "댓글 내용을 입력해주세요.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Returns `value` when it is present and not whitespace-only.
pub(crate) fn require_text(
    value: Option<&str>,
    violation: ValidationError,
) -> Result<&str, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(violation),
    }
}
