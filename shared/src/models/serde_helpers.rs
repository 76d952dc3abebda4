//! Common serde helpers for loosely-typed input
//!
//! 仪表盘和查询字符串会把“未选择”发送为空字符串，
//! 这里统一把空字符串视为字段缺失。

use serde::{Deserialize, Deserializer, de};
use std::str::FromStr;

/// Deserialize `Option<T>` from an optional string, treating `""` as `None`
///
/// 非空字符串通过 `FromStr` 解析，解析失败返回反序列化错误。
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
