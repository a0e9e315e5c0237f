/// 业务错误码，随响应体的 `code` 字段返回
///
/// 0 表示成功；1xxx 请求格式问题；2xxx 字段或约束校验失败；3xxx 记录不存在；5xxx 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,

    MissingField = 2001,
    InvalidRange = 2002,
    InvalidDate = 2003,
    InvalidSemester = 2004,
    DuplicateMark = 2005,
    ConstraintViolation = 2006,

    NotFound = 3000,
    StudentNotFound = 3001,
    SubjectNotFound = 3002,

    InternalError = 5000,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_ranges() {
        assert_eq!(ErrorCode::Success.as_i32(), 0);
        assert_eq!(ErrorCode::DuplicateMark.as_i32(), 2005);
        assert_eq!(ErrorCode::StudentNotFound.as_i32(), 3001);
        assert_eq!(ErrorCode::InternalError.as_i32(), 5000);
    }
}
