use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

use crate::errors::UriError;

/// Parsed form of an endpoint address: `scheme:topic?key1=val1&key2=val2`.
///
/// The authority form `scheme://topic?...` is accepted as well. The topic and
/// the query pairs are percent-decoded. Query pairs are kept in the order they
/// appear; duplicate keys are left for the caller to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAddress {
    scheme: String,
    topic: String,
    query: Vec<(String, String)>,
}

impl EndpointAddress {
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        let url = Url::parse(raw).map_err(|e| match e {
            ParseError::RelativeUrlWithoutBase => UriError::MissingScheme(raw.to_string()),
            other => UriError::Malformed {
                uri: raw.to_string(),
                reason: other.to_string(),
            },
        })?;

        let topic = match url.host_str() {
            Some(host) => format!("{}{}", host, url.path()),
            None => url.path().to_string(),
        };
        let topic = percent_decode_str(topic.trim_matches('/'))
            .decode_utf8()
            .map_err(|e| UriError::Malformed {
                uri: raw.to_string(),
                reason: format!("topic is not valid utf-8: {e}"),
            })?
            .into_owned();

        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(EndpointAddress {
            scheme: url.scheme().to_string(),
            topic,
            query,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The mandatory path segment. Empty when the address names no topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn into_query_pairs(self) -> Vec<(String, String)> {
        self.query
    }
}
