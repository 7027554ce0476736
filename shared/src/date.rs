//! 服务端时间类型
//!
//! 后端的时间字段没有统一格式：部分带时区（RFC 3339），
//! 部分是无时区的 ISO 本地时间。`ServerDate` 两种都接受，
//! 序列化时固定输出无时区 ISO 格式。

use chrono::{DateTime, NaiveDateTime};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 服务端报告的时间点（创建时间、报名时间、交卷时间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerDate(NaiveDateTime);

impl ServerDate {
    pub fn new(inner: NaiveDateTime) -> Self {
        Self(inner)
    }

    /// 解析服务端时间字符串
    ///
    /// 优先按 RFC 3339 解析（丢弃时区，保留 UTC 时刻），
    /// 失败后按无时区 ISO 格式解析。
    pub fn parse(value: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(dt.naive_utc()));
        }
        // 允许省略小数秒
        value
            .parse::<NaiveDateTime>()
            .ok()
            .map(Self)
    }

    /// 列表展示用的短日期，如 "07.05.2024"
    pub fn short(&self) -> String {
        self.0.format("%d.%m.%Y").to_string()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl std::fmt::Display for ServerDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl Serialize for ServerDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(ISO_FORMAT))
    }
}

impl<'de> Deserialize<'de> for ServerDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ServerDate::parse(&raw)
            .ok_or_else(|| DeError::custom(format!("unrecognized datetime: {raw}")))
    }
}
