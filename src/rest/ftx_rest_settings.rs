pub struct FtxRestSettings {
    host: String,
}

impl FtxRestSettings {
    pub const DEFAULT_HOST: &'static str = "https://ftx.com";

    pub fn new() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn get_host(&self) -> &str {
        &self.host
    }
}

impl Default for FtxRestSettings {
    fn default() -> Self {
        Self::new()
    }
}
