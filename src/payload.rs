//! Payload formatting for each supported QR content type.
//!
//! Every function in this module is a pure mapping from a form record to the exact string that
//! gets encoded into the QR symbol. A record whose required field is missing (or empty) formats to
//! the empty string; there is no error path.
//!
//! Optional fields follow the same rule: `Some("")` is treated as absent.
//!
//! # Example
//!
//! ```rust
//! use qrforge::payload::{format_wifi, WifiData, WifiEncryption};
//!
//! let wifi = WifiData {
//!     ssid: "Home".to_string(),
//!     password: Some("secret".to_string()),
//!     encryption: WifiEncryption::Wpa,
//! };
//! assert_eq!(format_wifi(&wifi), "WIFI:T:WPA;S:Home;P:secret;H:true;");
//! ```
use core::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Bytes left untouched by `encodeURIComponent`; everything else is percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Form data for a plain URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlData {
    pub url: String,
}

/// Form data for free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextData {
    pub text: String,
}

/// Authentication type of a Wi-Fi network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    /// The value written after `T:` in a `WIFI:` payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form data for joining a Wi-Fi network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiData {
    pub ssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub encryption: WifiEncryption,
}

/// Form data for composing an email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailData {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Form data for a phone call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneData {
    pub phone: String,
}

/// Form data for a text message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsData {
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Form data for a contact card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VCardData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Percent-encodes `value` the way `encodeURIComponent` does.
///
/// Non-ASCII characters are encoded as their UTF-8 bytes, using upper-case hex digits.
///
/// ```rust
/// use qrforge::payload::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_uri_component("(ok)!"), "(ok)!");
/// ```
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Backslash-escapes the characters reserved by the `WIFI:` scheme: `\ ; , " '`.
///
/// ```rust
/// use qrforge::payload::escape_wifi_field;
///
/// assert_eq!(escape_wifi_field(r"a;b\c"), r"a\;b\\c");
/// ```
pub fn escape_wifi_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | '"' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Returns the URL verbatim.
pub fn format_url(data: &UrlData) -> String {
    data.url.clone()
}

/// Returns the text verbatim.
pub fn format_text(data: &TextData) -> String {
    data.text.clone()
}

/// Builds a `WIFI:T:<enc>;S:<ssid>;P:<password>;H:<hidden>;` payload.
///
/// `H:` is `true` exactly when the network uses WPA. Scanners that read it as a hidden-network
/// flag will treat WPA networks as hidden; existing codes depend on this output.
pub fn format_wifi(data: &WifiData) -> String {
    if data.ssid.is_empty() {
        return String::new();
    }
    let ssid = escape_wifi_field(&data.ssid);
    let password = present(&data.password)
        .map(escape_wifi_field)
        .unwrap_or_default();
    let hidden = data.encryption == WifiEncryption::Wpa;
    format!(
        "WIFI:T:{};S:{};P:{};H:{};",
        data.encryption, ssid, password, hidden
    )
}

/// Builds a `mailto:` URI with optional `subject` and `body` query parameters.
pub fn format_email(data: &EmailData) -> String {
    if data.email.is_empty() {
        return String::new();
    }
    let mut out = format!("mailto:{}", data.email);
    let mut separator = '?';
    if let Some(subject) = present(&data.subject) {
        out.push(separator);
        out.push_str("subject=");
        out.push_str(&encode_uri_component(subject));
        separator = '&';
    }
    if let Some(body) = present(&data.body) {
        out.push(separator);
        out.push_str("body=");
        out.push_str(&encode_uri_component(body));
    }
    out
}

/// Builds a `tel:` URI. The number is not normalized.
pub fn format_phone(data: &PhoneData) -> String {
    if data.phone.is_empty() {
        return String::new();
    }
    format!("tel:{}", data.phone)
}

/// Builds an `smsto:` URI with an optional pre-filled `body`.
pub fn format_sms(data: &SmsData) -> String {
    if data.phone.is_empty() {
        return String::new();
    }
    match present(&data.message) {
        Some(message) => format!("smsto:{}?body={}", data.phone, encode_uri_component(message)),
        None => format!("smsto:{}", data.phone),
    }
}

/// Builds a vCard 3.0 record.
///
/// Lines are joined with `\n` and values are written as-is: no folding and no escaping of
/// `,` `;` `\`.
pub fn format_vcard(data: &VCardData) -> String {
    if data.name.is_empty() {
        return String::new();
    }
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", data.name),
    ];
    let properties = [
        ("ORG", &data.company),
        ("TITLE", &data.title),
        ("TEL;TYPE=WORK,VOICE", &data.phone),
        ("EMAIL", &data.email),
        ("URL", &data.website),
    ];
    for (tag, field) in properties {
        if let Some(value) = present(field) {
            lines.push(format!("{}:{}", tag, value));
        }
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_missing_required_field_yields_empty() {
        assert_eq!(format_url(&UrlData::default()), "");
        assert_eq!(format_text(&TextData::default()), "");
        assert_eq!(format_wifi(&WifiData::default()), "");
        assert_eq!(format_phone(&PhoneData::default()), "");

        let email = EmailData {
            subject: some("Hi"),
            body: some("there"),
            ..Default::default()
        };
        assert_eq!(format_email(&email), "");

        let sms = SmsData {
            message: some("hello"),
            ..Default::default()
        };
        assert_eq!(format_sms(&sms), "");

        let vcard = VCardData {
            company: some("Acme"),
            email: some("j@acme.com"),
            ..Default::default()
        };
        assert_eq!(format_vcard(&vcard), "");
    }

    #[test]
    fn test_format_url() {
        let data = UrlData {
            url: "https://example.com".to_string(),
        };
        assert_eq!(format_url(&data), "https://example.com");
    }

    #[test]
    fn test_format_text_is_verbatim() {
        let data = TextData {
            text: "line one\nline two; a,b".to_string(),
        };
        assert_eq!(format_text(&data), "line one\nline two; a,b");
    }

    #[test]
    fn test_format_wifi_escapes_fields() {
        let data = WifiData {
            ssid: "My;Net".to_string(),
            password: some("p\"w"),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(format_wifi(&data), r#"WIFI:T:WPA;S:My\;Net;P:p\"w;H:true;"#);
    }

    #[test]
    fn test_format_wifi_open_network() {
        let data = WifiData {
            ssid: "Open".to_string(),
            password: None,
            encryption: WifiEncryption::NoPass,
        };
        assert_eq!(format_wifi(&data), "WIFI:T:nopass;S:Open;P:;H:false;");
    }

    #[test]
    fn test_format_wifi_wep_is_not_hidden() {
        let data = WifiData {
            ssid: "Legacy".to_string(),
            password: some("abc"),
            encryption: WifiEncryption::Wep,
        };
        assert_eq!(format_wifi(&data), "WIFI:T:WEP;S:Legacy;P:abc;H:false;");
    }

    #[test]
    fn test_escape_wifi_field_adds_one_backslash_per_reserved_char() {
        let input = r#"a\b;c,d"e'f g"#;
        let escaped = escape_wifi_field(input);
        assert_eq!(escaped, r#"a\\b\;c\,d\"e\'f g"#);

        let reserved = input.chars().filter(|c| "\\;,\"'".contains(*c)).count();
        assert_eq!(escaped.len(), input.len() + reserved);
        assert_eq!(escape_wifi_field("plain-ssid_5G"), "plain-ssid_5G");
    }

    #[test]
    fn test_format_email_with_subject_and_body() {
        let data = EmailData {
            email: "a@b.com".to_string(),
            subject: some("Hi there"),
            body: some("A&B"),
        };
        assert_eq!(
            format_email(&data),
            "mailto:a@b.com?subject=Hi%20there&body=A%26B"
        );
    }

    #[test]
    fn test_format_email_body_only_starts_query() {
        let data = EmailData {
            email: "a@b.com".to_string(),
            subject: some(""),
            body: some("x=y"),
        };
        assert_eq!(format_email(&data), "mailto:a@b.com?body=x%3Dy");

        let bare = EmailData {
            email: "a@b.com".to_string(),
            ..Default::default()
        };
        assert_eq!(format_email(&bare), "mailto:a@b.com");
    }

    #[test]
    fn test_empty_optional_fields_are_treated_as_absent() {
        let wifi = WifiData {
            ssid: "Home".to_string(),
            password: some(""),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(format_wifi(&wifi), "WIFI:T:WPA;S:Home;P:;H:true;");

        let sms = SmsData {
            phone: "+111".to_string(),
            message: some(""),
        };
        assert_eq!(format_sms(&sms), "smsto:+111");

        let vcard = VCardData {
            name: "Jane Doe".to_string(),
            title: some(""),
            phone: some("+1555"),
            ..Default::default()
        };
        assert_eq!(
            format_vcard(&vcard),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nTEL;TYPE=WORK,VOICE:+1555\nEND:VCARD"
        );
    }

    #[test]
    fn test_encode_uri_component_matches_js() {
        assert_eq!(encode_uri_component("A-Z_a.z!~*'()09"), "A-Z_a.z!~*'()09");
        assert_eq!(encode_uri_component("/?#[]@$+,;:="), "%2F%3F%23%5B%5D%40%24%2B%2C%3B%3A%3D");
        assert_eq!(encode_uri_component("ç €"), "%C3%A7%20%E2%82%AC");
    }

    #[test]
    fn test_format_phone() {
        let data = PhoneData {
            phone: "+1 (555) 010".to_string(),
        };
        assert_eq!(format_phone(&data), "tel:+1 (555) 010");
    }

    #[test]
    fn test_format_sms() {
        let data = SmsData {
            phone: "+111".to_string(),
            message: None,
        };
        assert_eq!(format_sms(&data), "smsto:+111");

        let data = SmsData {
            phone: "+111".to_string(),
            message: some("see you at 5?"),
        };
        assert_eq!(format_sms(&data), "smsto:+111?body=see%20you%20at%205%3F");
    }

    #[test]
    fn test_format_vcard_skips_absent_fields() {
        let data = VCardData {
            name: "Jane Doe".to_string(),
            company: some("Acme"),
            email: some("j@acme.com"),
            ..Default::default()
        };
        assert_eq!(
            format_vcard(&data),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:Acme\nEMAIL:j@acme.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_format_vcard_full_field_order() {
        let data = VCardData {
            name: "Jane Doe".to_string(),
            phone: some("+1555"),
            email: some("j@acme.com"),
            company: some("Acme"),
            title: some("CTO"),
            website: some("https://acme.com"),
        };
        assert_eq!(
            format_vcard(&data),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:Acme\nTITLE:CTO\n\
             TEL;TYPE=WORK,VOICE:+1555\nEMAIL:j@acme.com\nURL:https://acme.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_formatting_is_repeatable() {
        let data = WifiData {
            ssid: "Cafe, \"Upstairs\"".to_string(),
            password: some("it's;here"),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(format_wifi(&data), format_wifi(&data));
    }

    #[test]
    fn test_wifi_encryption_wire_names() {
        let json = r#"{"ssid":"Net","encryption":"nopass"}"#;
        let data: WifiData = serde_json::from_str(json).unwrap();
        assert_eq!(data.encryption, WifiEncryption::NoPass);
        assert_eq!(data.password, None);
        assert_eq!(
            serde_json::to_string(&WifiEncryption::Wep).unwrap(),
            "\"WEP\""
        );
    }
}
