//! Content selection: one variant per QR category, wrapping that category's form record.
//!
//! Form state usually arrives as JSON tagged with the active category:
//!
//! ```rust
//! use qrforge::content::{ContentKind, QrContent};
//!
//! let content: QrContent = serde_json::from_str(r#"{"type":"phone","phone":"+15550100"}"#).unwrap();
//! assert_eq!(content.kind(), ContentKind::Phone);
//! assert_eq!(content.payload(), "tel:+15550100");
//! ```
use serde::{Deserialize, Serialize};

use crate::payload::{
    self, EmailData, PhoneData, SmsData, TextData, UrlData, VCardData, WifiData,
};

/// The payload for one QR code, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QrContent {
    Url(UrlData),
    Text(TextData),
    Wifi(WifiData),
    Email(EmailData),
    Phone(PhoneData),
    Sms(SmsData),
    #[serde(rename = "vcard")]
    VCard(VCardData),
}

impl Default for QrContent {
    fn default() -> Self {
        Self::Url(UrlData::default())
    }
}

impl QrContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Url(_) => ContentKind::Url,
            Self::Text(_) => ContentKind::Text,
            Self::Wifi(_) => ContentKind::Wifi,
            Self::Email(_) => ContentKind::Email,
            Self::Phone(_) => ContentKind::Phone,
            Self::Sms(_) => ContentKind::Sms,
            Self::VCard(_) => ContentKind::VCard,
        }
    }

    /// Formats the wrapped record with its category's formatter.
    ///
    /// Empty when the record's required field is missing.
    pub fn payload(&self) -> String {
        match self {
            Self::Url(data) => payload::format_url(data),
            Self::Text(data) => payload::format_text(data),
            Self::Wifi(data) => payload::format_wifi(data),
            Self::Email(data) => payload::format_email(data),
            Self::Phone(data) => payload::format_phone(data),
            Self::Sms(data) => payload::format_sms(data),
            Self::VCard(data) => payload::format_vcard(data),
        }
    }

    /// The string handed to the renderer: the payload, or a single space if it is empty.
    ///
    /// A blank symbol is still a valid QR code, so a half-filled form keeps a preview on screen.
    pub fn render_value(&self) -> String {
        let value = self.payload();
        if value.is_empty() {
            " ".to_string()
        } else {
            value
        }
    }
}

impl From<UrlData> for QrContent {
    fn from(data: UrlData) -> Self {
        Self::Url(data)
    }
}

impl From<TextData> for QrContent {
    fn from(data: TextData) -> Self {
        Self::Text(data)
    }
}

impl From<WifiData> for QrContent {
    fn from(data: WifiData) -> Self {
        Self::Wifi(data)
    }
}

impl From<EmailData> for QrContent {
    fn from(data: EmailData) -> Self {
        Self::Email(data)
    }
}

impl From<PhoneData> for QrContent {
    fn from(data: PhoneData) -> Self {
        Self::Phone(data)
    }
}

impl From<SmsData> for QrContent {
    fn from(data: SmsData) -> Self {
        Self::Sms(data)
    }
}

impl From<VCardData> for QrContent {
    fn from(data: VCardData) -> Self {
        Self::VCard(data)
    }
}

/// QR content category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Url,
    Text,
    Wifi,
    Email,
    Phone,
    Sms,
    #[serde(rename = "vcard")]
    VCard,
}

impl ContentKind {
    pub const ALL: [ContentKind; 7] = [
        Self::Url,
        Self::Text,
        Self::Wifi,
        Self::Email,
        Self::Phone,
        Self::Sms,
        Self::VCard,
    ];

    /// Human-readable name for tabs and menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Text => "Text",
            Self::Wifi => "Wi-Fi",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Sms => "SMS",
            Self::VCard => "vCard",
        }
    }

    /// Blank form state for this category. Wi-Fi starts on WPA.
    pub fn empty_content(self) -> QrContent {
        match self {
            Self::Url => UrlData::default().into(),
            Self::Text => TextData::default().into(),
            Self::Wifi => WifiData::default().into(),
            Self::Email => EmailData::default().into(),
            Self::Phone => PhoneData::default().into(),
            Self::Sms => SmsData::default().into(),
            Self::VCard => VCardData::default().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::WifiEncryption;

    #[test]
    fn test_deserialize_tagged_wifi() {
        let json = r#"{"type":"wifi","ssid":"My;Net","password":"p\"w","encryption":"WPA"}"#;
        let content: QrContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.kind(), ContentKind::Wifi);
        assert_eq!(content.payload(), r#"WIFI:T:WPA;S:My\;Net;P:p\"w;H:true;"#);
    }

    #[test]
    fn test_deserialize_vcard_with_partial_fields() {
        let json = r#"{"type":"vcard","name":"Jane Doe","company":"Acme","email":"j@acme.com"}"#;
        let content: QrContent = serde_json::from_str(json).unwrap();
        assert_eq!(
            content.payload(),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:Acme\nEMAIL:j@acme.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let content: QrContent = serde_json::from_str(r#"{"type":"email"}"#).unwrap();
        assert_eq!(content.payload(), "");
        assert_eq!(content.render_value(), " ");
    }

    #[test]
    fn test_render_value_passes_payload_through() {
        let content = QrContent::from(UrlData {
            url: "https://example.com".to_string(),
        });
        assert_eq!(content.render_value(), "https://example.com");
    }

    #[test]
    fn test_empty_content_matches_kind() {
        for kind in ContentKind::ALL {
            let content = kind.empty_content();
            assert_eq!(content.kind(), kind);
            assert_eq!(content.payload(), "");
        }
        match ContentKind::Wifi.empty_content() {
            QrContent::Wifi(data) => assert_eq!(data.encryption, WifiEncryption::Wpa),
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_serialize_uses_lowercase_tag() {
        let content = QrContent::from(SmsData {
            phone: "+111".to_string(),
            message: None,
        });
        assert_eq!(
            serde_json::to_string(&content).unwrap(),
            r#"{"type":"sms","phone":"+111"}"#
        );
        assert_eq!(QrContent::default().kind(), ContentKind::Url);
        assert_eq!(ContentKind::VCard.label(), "vCard");
    }
}
