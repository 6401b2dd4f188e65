//! Endpoint → `BuiltRequest` translation.
//!
//! # Design
//! `build_request` is a pure function: it reads an endpoint, validates the
//! URL, copies method and headers, then lets the body strategy fill in the
//! body and/or query string. Strategy headers are written after the
//! endpoint's own headers and replace them. Apart from the multipart boundary
//! the output depends only on the input.

use url::Url;

use crate::encoding::EncodingKind;
use crate::endpoint::{BodyStrategy, Endpoint};
use crate::error::{NetError, NetResult};
use crate::http::{set_header, BuiltRequest};
use crate::multipart::MultipartForm;

/// Build a transport-ready request from an endpoint.
///
/// Fails with [`NetError::Configuration`] when `base_url + path` is not an
/// absolute URL and with [`NetError::Encoding`] when parameters cannot be
/// serialized. Nothing is sent in either case.
pub fn build_request<E: Endpoint + ?Sized>(endpoint: &E) -> NetResult<BuiltRequest> {
    let url = format!("{}{}", endpoint.base_url(), endpoint.path());
    if Url::parse(&url).is_err() {
        return Err(NetError::Configuration { url });
    }

    let mut request = BuiltRequest {
        method: endpoint.method(),
        url,
        headers: endpoint.headers().unwrap_or_default(),
        body: None,
    };

    match endpoint.body() {
        BodyStrategy::Plain => {}
        BodyStrategy::RawData(data) => {
            request.body = Some(data);
        }
        BodyStrategy::EncodedParameters { parameters, encoding } => {
            encoding.encode(&mut request, &parameters)?;
        }
        BodyStrategy::CompositeData { body, url_parameters } => {
            EncodingKind::UrlQuery.encode(&mut request, &url_parameters)?;
            request.body = Some(body);
        }
        BodyStrategy::MultipartUpload(data) => {
            let form = MultipartForm::new(data);
            set_header(&mut request.headers, "Content-Type", form.content_type());
            request.body = Some(form.to_bytes());
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{EndpointDescriptor, Parameters};
    use crate::http::HttpMethod;
    use serde_json::json;

    const BASE: &str = "https://api.example.com";

    fn params(value: serde_json::Value) -> Parameters {
        crate::endpoint::to_parameters(&value).unwrap()
    }

    #[test]
    fn plain_get_produces_correct_request() {
        let req = build_request(&EndpointDescriptor::get(BASE, "/items")).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.example.com/items");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn plain_keeps_descriptor_headers_exactly() {
        let headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "text/plain".to_string()),
        ];
        let d = EndpointDescriptor::new(BASE, "/items", HttpMethod::Head).headers(headers.clone());
        let req = build_request(&d).unwrap();
        assert_eq!(req.method, HttpMethod::Head);
        assert_eq!(req.headers, headers);
        assert!(req.body.is_none());
    }

    #[test]
    fn raw_data_is_copied_byte_for_byte() {
        let bytes = vec![0u8, 159, 146, 150, b'\r', b'\n', 255];
        let d = EndpointDescriptor::post(BASE, "/blob").body(BodyStrategy::RawData(bytes.clone()));
        let req = build_request(&d).unwrap();
        assert_eq!(req.body, Some(bytes));
        assert_eq!(req.url, "https://api.example.com/blob");
    }

    #[test]
    fn path_is_not_normalized() {
        let d = EndpointDescriptor::get("https://api.example.com/v1/", "/items");
        let req = build_request(&d).unwrap();
        assert_eq!(req.url, "https://api.example.com/v1//items");
    }

    #[test]
    fn composite_data_sets_query_and_body() {
        let d = EndpointDescriptor::new(BASE, "/items", HttpMethod::Put).body(
            BodyStrategy::CompositeData {
                body: b"{}".to_vec(),
                url_parameters: params(json!({"page": "2"})),
            },
        );
        let req = build_request(&d).unwrap();
        assert_eq!(req.url, "https://api.example.com/items?page=2");
        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn composite_data_with_empty_parameters_keeps_body() {
        let d = EndpointDescriptor::post(BASE, "/items").body(BodyStrategy::CompositeData {
            body: b"payload".to_vec(),
            url_parameters: Parameters::new(),
        });
        let req = build_request(&d).unwrap();
        assert_eq!(req.url, "https://api.example.com/items");
        assert_eq!(req.body.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn encoded_parameters_json_overrides_content_type() {
        let d = EndpointDescriptor::post(BASE, "/items")
            .header("CONTENT-TYPE", "text/plain")
            .header("Accept", "*/*")
            .body(BodyStrategy::EncodedParameters {
                parameters: params(json!({"title": "Buy milk"})),
                encoding: EncodingKind::JsonBody,
            });
        let req = build_request(&d).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("Accept".to_string(), "*/*".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"title": "Buy milk"}));
    }

    #[test]
    fn encoded_parameters_query_leaves_body_empty() {
        let d = EndpointDescriptor::get(BASE, "/search").body(BodyStrategy::EncodedParameters {
            parameters: params(json!({"q": "rust lang", "tags": ["a", "b"]})),
            encoding: EncodingKind::UrlQuery,
        });
        let req = build_request(&d).unwrap();
        assert_eq!(
            req.url,
            "https://api.example.com/search?q=rust+lang&tags%5B0%5D=a&tags%5B1%5D=b"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn multipart_overrides_content_type_and_wraps_file() {
        let d = EndpointDescriptor::post(BASE, "/upload")
            .header("Content-Type", "application/json")
            .body(BodyStrategy::MultipartUpload(b"JPEGDATA".to_vec()));
        let req = build_request(&d).unwrap();

        let content_type = req.header("content-type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap()
            .to_string();
        assert_eq!(req.headers.len(), 1);

        let body = req.body.unwrap();
        let expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"file\"\r\n\
Content-Type: image/jpg\r\n\r\nJPEGDATA\r\n--{boundary}--"
        );
        assert_eq!(body, expected.into_bytes());
    }

    #[test]
    fn multipart_boundary_changes_between_builds() {
        let d = EndpointDescriptor::post(BASE, "/upload")
            .body(BodyStrategy::MultipartUpload(b"x".to_vec()));
        let a = build_request(&d).unwrap();
        let b = build_request(&d).unwrap();

        let boundary = |r: &BuiltRequest| {
            r.header("Content-Type")
                .unwrap()
                .trim_start_matches("multipart/form-data; boundary=")
                .to_string()
        };
        let (ba, bb) = (boundary(&a), boundary(&b));
        assert_ne!(ba, bb);

        let strip = |r: &BuiltRequest, b: &str| r.body_text().replace(b, "BOUNDARY");
        assert_eq!(strip(&a, &ba), strip(&b, &bb));
    }

    #[test]
    fn empty_url_is_configuration_error() {
        let err = build_request(&EndpointDescriptor::get("", "")).unwrap_err();
        assert!(matches!(err, NetError::Configuration { ref url } if url.is_empty()));
    }

    #[test]
    fn relative_url_is_configuration_error() {
        let err = build_request(&EndpointDescriptor::get("api.example.com", "/items")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn building_twice_gives_equal_requests() {
        let d = EndpointDescriptor::post(BASE, "/login").body(BodyStrategy::EncodedParameters {
            parameters: params(json!({"user": "a"})),
            encoding: EncodingKind::FormBody,
        });
        assert_eq!(build_request(&d).unwrap(), build_request(&d).unwrap());
    }
}
