use crate::proxy::make_http_client;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::warn;
use url::ParseError;
use utility::{Error, Result};

///an API client for the OpenFaaS gateway
pub struct Client {
    pub(crate) http_client: reqwest::Client,
    ///base url of OpenFaaS gateway
    pub gateway: Url,
}

///ClientAuth an interface for client authentication.
// to add authentication to a request implement this interface
pub trait ClientAuth: Send + Sync {
    fn set(&self, req: &mut reqwest::RequestBuilder) -> Result<()>;
}

impl Client {
    /// initializes a new API client, `timeout` bounds every request made through it
    pub fn new(gateway: &str, timeout: Option<Duration>) -> Result<Client> {
        let url = gateway.trim_end_matches('/');
        let url = Url::parse(url).map_err(|e| {
            Error::Custom(format!("invalid gateway url {:?}: {}", gateway, e))
        })?;

        Ok(Client {
            http_client: make_http_client(timeout)?,
            gateway: url,
        })
    }

    ///create a new HTTP request against the gateway with authentication
    pub fn new_request(
        &self,
        method: reqwest::Method,
        path: &str,
        auth: &dyn ClientAuth,
    ) -> Result<reqwest::RequestBuilder> {
        let u = match Url::parse(path) {
            Ok(u) => u,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let url = format!("http://example.com/{}", path.trim_start_matches('/'));
                Url::parse(url.as_str())?
            }
            Err(e) => return Err(Error::Custom(format!("{:?}", e))),
        };

        // copy the gateway url and append the supplied path so that a gateway
        // served from a sub path keeps its prefix
        let mut endpoint = self.gateway.clone();
        let path = format!(
            "{}/{}",
            endpoint.path().trim_end_matches('/'),
            u.path().trim_start_matches('/')
        );
        endpoint.set_path(path.as_str());
        endpoint.set_query(u.query());

        let mut req = self.http_client.request(method, endpoint);
        auth.set(&mut req)?;

        Ok(req)
    }

    ///perform an HTTP request and read the whole response body.
    ///A request that times out is sent a second time before giving up.
    pub(crate) async fn do_request(&self, req: reqwest::Request) -> Result<(StatusCode, Vec<u8>)> {
        let retry = req.try_clone();
        match self.execute(req).await {
            Err(Error::Reqwest(e)) if e.is_timeout() => match retry {
                Some(req) => {
                    warn!(url = %req.url(), "request to gateway timed out, retrying once");
                    self.execute(req).await
                }
                None => Err(Error::Reqwest(e)),
            },
            res => res,
        }
    }

    async fn execute(&self, req: reqwest::Request) -> Result<(StatusCode, Vec<u8>)> {
        let res = self.http_client.execute(req).await?;
        let status = res.status();
        let body = res.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

/// appends `params` to the query of `url`, which may be relative to the gateway
pub(crate) fn add_query_params(url: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut relative = false;
    let mut parsed_url = match Url::parse(url) {
        Ok(u) => u,
        Err(ParseError::RelativeUrlWithoutBase) => {
            let url = format!("http://example.com/{}", url.trim_start_matches('/'));
            relative = true;
            Url::parse(url.as_str())?
        }
        Err(e) => return Err(Error::Custom(format!("{:?}", e))),
    };
    {
        let mut modifier = parsed_url.query_pairs_mut();
        for (key, val) in params {
            modifier.append_pair(key, val);
        }
    }

    let url = parsed_url.to_string();
    if relative {
        Ok(url.trim_start_matches("http://example.com").to_string())
    } else {
        Ok(url)
    }
}

#[test]
fn test_add_query_params() {
    struct TestCase {
        _name: &'static str,
        params: Vec<(&'static str, &'static str)>,
        url: &'static str,
        expected_url: &'static str,
    }

    let cases = vec![
        TestCase {
            _name: "url without hostname",
            params: vec![("function", "figlet"), ("metrics_window", "24")],
            url: "/function/system-metrics",
            expected_url: "/function/system-metrics?function=figlet&metrics_window=24",
        },
        TestCase {
            _name: "url hostname",
            params: vec![("function", "figlet")],
            url: "http://127.0.0.1/function/system-metrics",
            expected_url: "http://127.0.0.1/function/system-metrics?function=figlet",
        },
        TestCase {
            _name: "A url with simple hostname",
            params: vec![("function", "figlet")],
            url: "example",
            expected_url: "/example?function=figlet",
        },
        TestCase {
            _name: "values are encoded",
            params: vec![("function", "fig let&x=1")],
            url: "/function/system-metrics",
            expected_url: "/function/system-metrics?function=fig+let%26x%3D1",
        },
    ];

    for test in cases {
        let res = add_query_params(test.url, &test.params);
        assert!(res.is_ok());
        let url = res.unwrap();
        assert_eq!(url, test.expected_url);
    }
}
