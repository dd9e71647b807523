use serde::{Deserialize, Serialize};

/// QR module rendering style offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleShape {
    Square,
    Rounded,
    Dots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// Foreground coloring, tagged by `colorMode` on the wire.
///
/// The tag and the variant fields guarantee the payload invariant: a solid
/// request carries `fillColor` and no gradient fields, a gradient request
/// the inverse. Invalid combinations are unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "colorMode", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ColorScheme {
    Solid {
        fill_color: String,
    },
    Gradient {
        gradient_type: GradientKind,
        gradient_color1: String,
        gradient_color2: String,
    },
}

/// One `POST /api/qrcode` body.
///
/// Built fresh per submission and dropped after the round trip; nothing is
/// reused across submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    pub url: String,
    pub module_shape: ModuleShape,
    pub back_color: String,
    #[serde(flatten)]
    pub color: ColorScheme,
    /// Data-URL encoded logo image, centered on the code by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn solid_request() -> QrRequest {
        QrRequest {
            url: "https://example.com".into(),
            module_shape: ModuleShape::Square,
            back_color: "#FFFFFF".into(),
            color: ColorScheme::Solid {
                fill_color: "#000000".into(),
            },
            logo: None,
        }
    }

    #[test]
    fn solid_payload_has_fill_and_no_gradient_fields() {
        let value = serde_json::to_value(solid_request()).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://example.com",
                "moduleShape": "square",
                "backColor": "#FFFFFF",
                "colorMode": "solid",
                "fillColor": "#000000",
            })
        );
    }

    #[test]
    fn gradient_payload_has_gradient_fields_and_no_fill() {
        let request = QrRequest {
            color: ColorScheme::Gradient {
                gradient_type: GradientKind::Radial,
                gradient_color1: "#11F4FF".into(),
                gradient_color2: "#0040FF".into(),
            },
            ..solid_request()
        };
        let value = serde_json::to_value(request).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["colorMode"], Value::from("gradient"));
        assert_eq!(obj["gradientType"], Value::from("radial"));
        assert_eq!(obj["gradientColor1"], Value::from("#11F4FF"));
        assert_eq!(obj["gradientColor2"], Value::from("#0040FF"));
        assert!(!obj.contains_key("fillColor"));
    }

    #[test]
    fn logo_serializes_only_when_present() {
        let without = serde_json::to_value(solid_request()).unwrap();
        assert!(!without.as_object().unwrap().contains_key("logo"));

        let with = QrRequest {
            logo: Some("data:image/png;base64,AAAA".into()),
            ..solid_request()
        };
        let value = serde_json::to_value(with).unwrap();
        assert_eq!(value["logo"], Value::from("data:image/png;base64,AAAA"));
    }

    #[test]
    fn payload_round_trips() {
        let request = QrRequest {
            color: ColorScheme::Gradient {
                gradient_type: GradientKind::Linear,
                gradient_color1: "#AAAAAA".into(),
                gradient_color2: "#BBBBBB".into(),
            },
            ..solid_request()
        };
        let text = serde_json::to_string(&request).unwrap();
        let back: QrRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, request);
    }
}
