//! Field-level validation shared by every create/update operation.
//!
//! Required strings must be present, be JSON strings, and contain something other
//! than whitespace. Accepted strings are uppercased before they are stored or compared.

use serde_json::{Number, Value};

use super::errors::ValidationError;

/// 必須文字列項目を検証し、大文字に正規化して返す
pub fn required_text(field: &'static str, value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) => {
            if is_blank(s) {
                return Err(ValidationError::Missing(field));
            }
            Ok(normalize(s))
        }
        Some(_) => Err(ValidationError::InvalidType(field)),
    }
}

/// 任意文字列項目を検証する
///
/// 未指定・nullは`None`。指定された場合は文字列であること。
pub fn optional_text(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(normalize(s))),
        Some(_) => Err(ValidationError::InvalidType(field)),
    }
}

/// 部分更新用: 指定された場合のみ必須項目と同じ規則で検証する
///
/// 空文字が渡された場合は「未指定」ではなくエラーになる。
pub fn patch_text(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) => required_text(field, Some(v)).map(Some),
    }
}

/// 必須の数値ID項目を検証する
///
/// `0`は未指定として扱う。
pub fn required_id(field: &'static str, value: Option<&Value>) -> Result<i64, ValidationError> {
    optional_id(field, value)?.ok_or(ValidationError::Missing(field))
}

/// 任意の数値ID項目を検証する
///
/// 未指定・null・`0`は`None`。`3.0`のように小数部のない数値は整数として受け付ける。
/// それ以外の値は型エラー。
pub fn optional_id(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<i64>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match as_whole_number(n) {
            Some(0) => Ok(None),
            Some(id) if id > 0 => Ok(Some(id)),
            _ => Err(ValidationError::InvalidType(field)),
        },
        Some(_) => Err(ValidationError::InvalidType(field)),
    }
}

fn as_whole_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 は 2^63 に丸められるため上限は開区間
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// 保存・比較前の正規化（大文字化）
pub fn normalize(s: &str) -> String {
    s.to_uppercase()
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}
