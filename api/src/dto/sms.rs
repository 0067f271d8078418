use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_shared::phone::MOBILE_PHONE_REGEX;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Mainland mobile number, 11 digits starting with 1
    #[validate(regex(path = *MOBILE_PHONE_REGEX, message = "请输入正确的手机号码"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(regex(path = *MOBILE_PHONE_REGEX, message = "请输入正确的手机号码"))]
    pub phone: String,

    /// 6-digit verification code
    #[validate(length(equal = 6, message = "验证码为6位数字"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub expires_at: DateTime<Utc>,
    /// Seconds until another code may be requested
    pub resend_after: i64,
    /// Raw code, development mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub remaining_seconds: i64,
}
