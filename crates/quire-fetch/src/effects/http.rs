use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

/// A boxed stream of response body chunks.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status, size hint and body of one HTTP GET.
pub struct FetchedResponse<E> {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Minimal HTTP surface the download engine needs.
///
/// The production implementation is [`ReqwestClient`]; tests substitute
/// scripted mocks. Implementations handle their own redirect following; the
/// engine owns timeouts and status interpretation.
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a GET request and hand back the status line plus body stream.
    ///
    /// A non-2xx status is not an error at this layer; it is returned in
    /// [`FetchedResponse::status`] for the engine to judge.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<FetchedResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::error::FetchError;

    /// Production HTTP client backed by `reqwest`.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self, FetchError> {
            reqwest::Client::builder()
                .build()
                .map(|client| Self { client })
                .map_err(|e| FetchError::Network(e.to_string()))
        }

        /// Reuse an already-configured client (connection pool included).
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<FetchedResponse<Self::Error>, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let content_length = response.content_length();

            Ok(FetchedResponse {
                status,
                content_length,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
