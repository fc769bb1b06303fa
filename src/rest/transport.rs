use http::Request;

use super::FtxRestError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FtxResponse {
    pub status: u16,
    pub body: String,
}

impl FtxResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait FtxTransport {
    fn execute(&self, request: Request<Vec<u8>>) -> Result<FtxResponse, FtxRestError>;
}

impl FtxTransport for reqwest::blocking::Client {
    fn execute(&self, request: Request<Vec<u8>>) -> Result<FtxResponse, FtxRestError> {
        let (parts, body) = request.into_parts();

        let mut builder = self
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);

        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(FtxResponse { status, body })
    }
}
