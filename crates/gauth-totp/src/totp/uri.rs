//! `otpauth://` provisioning links per the Google Authenticator key-URI
//! format:
//! <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//!
//! Format: `otpauth://totp/ISSUER:ACCOUNT?secret=BASE32&issuer=ISSUER`
//!
//! Only string formatting happens here; nothing is fetched.

use url::form_urlencoded;

/// Base of the chart service that renders QR images.
pub const CHART_BASE_URL: &str = "https://chart.googleapis.com/chart";
/// QR image edge length in pixels.
pub const DEFAULT_QR_SIZE: u32 = 200;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the `otpauth://totp/` URI an authenticator app scans.
///
/// The issuer prefix and `issuer` parameter are omitted when `issuer` is
/// empty.
pub fn provisioning_uri(secret: &str, account: &str, issuer: &str) -> String {
    let account = encode_component(account);
    if issuer.is_empty() {
        format!("otpauth://totp/{}?secret={}", account, secret)
    } else {
        let issuer = encode_component(issuer);
        format!(
            "otpauth://totp/{}:{}?secret={}&issuer={}",
            issuer, account, secret, issuer
        )
    }
}

/// Link to a `size`×`size` QR image encoding `uri`.
pub fn chart_qr_url(uri: &str, size: u32) -> String {
    let encoded: String = form_urlencoded::byte_serialize(uri.as_bytes()).collect();
    format!(
        "{}?chs={}x{}&chld=M|0&cht=qr&chl={}",
        CHART_BASE_URL, size, size, encoded
    )
}

/// QR link for a secret, at [`DEFAULT_QR_SIZE`].
pub fn provisioning_qr_url(secret: &str, account: &str, issuer: &str) -> String {
    chart_qr_url(&provisioning_uri(secret, account, issuer), DEFAULT_QR_SIZE)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  URL encoding helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Percent-encode a label component. Spaces become `%20` rather than the
/// form-encoding `+`, which authenticator apps would show literally.
fn encode_component(s: &str) -> String {
    // A literal '+' is serialised as %2B, so every remaining '+' was a space.
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "JBSWY3DPEHPK3PXP";

    #[test]
    fn uri_with_issuer() {
        assert_eq!(
            provisioning_uri(SECRET, "Tester", "Test Co."),
            "otpauth://totp/Test%20Co.:Tester?secret=JBSWY3DPEHPK3PXP&issuer=Test%20Co."
        );
    }

    #[test]
    fn uri_without_issuer() {
        assert_eq!(
            provisioning_uri(SECRET, "Tester", ""),
            "otpauth://totp/Tester?secret=JBSWY3DPEHPK3PXP"
        );
    }

    #[test]
    fn account_is_percent_encoded() {
        let uri = provisioning_uri(SECRET, "alice@example.com", "");
        assert!(uri.starts_with("otpauth://totp/alice%40example.com?"));
    }

    #[test]
    fn chart_url_format() {
        let uri = provisioning_uri(SECRET, "Tester", "");
        assert_eq!(
            chart_qr_url(&uri, 300),
            "https://chart.googleapis.com/chart?chs=300x300&chld=M|0&cht=qr\
             &chl=otpauth%3A%2F%2Ftotp%2FTester%3Fsecret%3DJBSWY3DPEHPK3PXP"
        );
    }

    #[test]
    fn default_qr_size() {
        let url = provisioning_qr_url(SECRET, "Tester", "Test Co.");
        assert!(url.starts_with("https://chart.googleapis.com/chart?chs=200x200&"));
        assert!(url.contains("issuer%3DTest%2520Co."));
    }

    #[test]
    fn label_components_escape_reserved_chars() {
        let cases = [
            ("Acme", "Acme"),
            ("Acme Corp", "Acme%20Corp"),
            ("bob+tag@mail", "bob%2Btag%40mail"),
            ("team:ops", "team%3Aops"),
            ("Zoë", "Zo%C3%AB"),
        ];
        for (raw, encoded) in cases {
            assert_eq!(encode_component(raw), encoded, "component {:?}", raw);
        }
    }
}
