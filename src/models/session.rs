use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in vendor a desk works on behalf of.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorSession {
    pub vendor_id: String,
    pub vendor_name: String,
    pub phone: String,
    pub signed_in_at: DateTime<Utc>,
}

impl VendorSession {
    pub fn new(
        vendor_id: impl Into<String>,
        vendor_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            vendor_name: vendor_name.into(),
            phone: phone.into(),
            signed_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Short message the front end shows as a toast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }
}
