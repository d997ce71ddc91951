use anyhow::{Error as AnyhowError, Result};
use clap::Args;
use cookie::Cookie;
use derive_getters::Getters;
use derive_setters::Setters;
use dirs::data_local_dir;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{redirect::Policy, Client, ClientBuilder, Proxy};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug, Args, Getters, Clone, Copy)]
pub struct RetryArgs {
    ///Maximum number of retries for a request that failed with a transient
    /// error (connection reset, 5xx, 408, 429).
    #[arg(short = 'r', long, default_value_t = 3)]
    pub max_no_retries: usize,
    ///Upper bound in seconds for the delay between two retries,
    /// the delay grows exponentially up to this bound.
    #[arg(short = 'd', long, default_value_t = 4)]
    pub retry_delay_secs: usize,
}

impl RetryArgs {
    pub fn new(max_no_retries: usize, retry_delay_secs: usize) -> Self {
        Self { max_no_retries, retry_delay_secs }
    }
}

impl Default for RetryArgs {
    fn default() -> Self {
        Self { max_no_retries: 3, retry_delay_secs: 4 }
    }
}

#[derive(Args, Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct HttpArgs {
    #[command(flatten)]
    pub retry_args: RetryArgs,
    /// Bearer token sent with every API request.
    #[arg(long, env = "TELLER_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<SecretString>,
    ///Maximum http redirects this application will make if need be.
    #[arg(long)]
    pub max_redirects: Option<usize>,
    /// Set http timeout(in secs) for all http request.
    #[arg(short = 'T', long, default_value_t = 30)]
    pub timeout: usize,
    ///Only http proxies are supported currently.
    #[arg(short = 'p', long)]
    pub proxy_url: Option<String>,
    /// Use a column seperated key value pair e.g key1:value1,key2:value2 for request headers.
    #[arg(long)]
    pub request_headers: Option<String>,
    /// Add http cookies from previous http session.
    #[arg(long)]
    pub http_cookies: Option<String>,
    /// Set http version,supports up to  http version 1.1.
    #[arg(long)]
    pub http_version: Option<String>,
}

impl Default for HttpArgs {
    fn default() -> Self {
        Self {
            retry_args: RetryArgs::default(),
            auth_token: None,
            max_redirects: None,
            timeout: 30,
            proxy_url: None,
            request_headers: None,
            http_cookies: None,
            http_version: None,
        }
    }
}

/// Everything needed to build the application graph.
#[derive(Args, Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct AppArgs {
    /// Banking API host, e.g. api.bank.az. A bare host is reached over https.
    #[arg(long, env = "TELLER_HOST", value_parser = parse_url, default_value = "localhost")]
    pub host: Url,
    /// Customer whose data is synchronised.
    #[arg(long, env = "TELLER_CUSTOMER_ID")]
    pub customer_id: Option<String>,
    /// Directory holding the local cache and preferences.
    #[arg(long, env = "TELLER_DATA_DIR", value_parser = parse_data_dir)]
    pub data_dir: Option<PathBuf>,
    /// How long the splash check waits before answering, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub splash_delay_ms: u64,
    #[command(flatten)]
    pub http_args: HttpArgs,
}

impl AppArgs {
    pub fn new(host: Url) -> Self {
        Self {
            host,
            customer_id: None,
            data_dir: None,
            splash_delay_ms: 2000,
            http_args: HttpArgs::default(),
        }
    }

    /// Base URL every API path is joined onto. Always ends with a slash.
    pub fn base_url(&self) -> Url {
        let mut base = self.host.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base
    }

    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_teller_data_dir(),
        }
    }
}

fn default_teller_data_dir() -> Result<PathBuf> {
    if let Some(home) = data_local_dir() {
        Ok(home.join("teller"))
    } else {
        error!("Can't get user data directory.");
        Err(anyhow::anyhow!("Can't get user data directory, pass --data-dir explicitly."))
    }
}

///This method takes a url as a string literal,checks and validate http
/// scheme in the url,parses it and return a Result Url or String
/// type if any error occur.
pub fn parse_url(url: &str) -> Result<Url, String> {
    if url.starts_with("https://") || url.starts_with("http://") {
        let parsed_url = Url::parse(url).map_err(|e| format!("Invalid Url {url} {e}"));
        return parsed_url;
    }
    let new_url = format!("https://{url}");
    Url::parse(&new_url).map_err(|e| format!("Invalid Url {url} {e}"))
}

/// Expands `~` and environment variables, then normalises the path.
fn parse_data_dir(path: &str) -> Result<PathBuf, String> {
    let expanded = shellexpand::full(path).map_err(|e| format!("Can't expand path {path}: {e}"))?;
    Ok(path_clean::clean(PathBuf::from(expanded.as_ref())))
}

impl TryFrom<HttpArgs> for reqwest::Client {
    type Error = AnyhowError;

    /// Tries to convert an `HttpArgs` into a `reqwest::Client`.
    fn try_from(http_config: HttpArgs) -> Result<Self, Self::Error> {
        build_async_client(http_config)
    }
}

fn build_async_client(http_config: HttpArgs) -> Result<Client, AnyhowError> {
    let mut client_config = ClientBuilder::new();
    info!("Initialized client builder.");

    let policy: Policy = if let Some(max_redirects) = http_config.max_redirects {
        info!("Maximum redirect has been set to {}", max_redirects);
        Policy::limited(max_redirects)
    } else {
        info!("Maximum redirect still default");
        Policy::default()
    };

    let timeout = {
        info!("Setting timeout to {}.", http_config.timeout);
        Duration::from_secs(http_config.timeout as u64)
    };

    client_config = client_config.timeout(timeout).redirect(policy);

    if let Some(proxy_url) = http_config.proxy_url {
        info!("Setting up user-defined proxy.");
        client_config = client_config.proxy(Proxy::all(proxy_url)?);
    } else {
        info!("No user defined proxy.");
        client_config = client_config.no_proxy();
    }

    if let Some(http_version) = http_config.http_version {
        client_config = if http_version.as_str() == "1.1" {
            info!("Still HTTP version 1.1.");
            client_config.http1_only()
        } else {
            warn!("Unsupported http version, using default http version 1.1.");
            client_config.http1_only()
        }
    }

    let mut request_header_headermap = HeaderMap::new();
    request_header_headermap.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    request_header_headermap.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = http_config.auth_token {
        info!("Setting up bearer authentication.");
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
        value.set_sensitive(true);
        request_header_headermap.insert(AUTHORIZATION, value);
    }

    // comma seperated header value e.g name:johndoe,age:23
    if let Some(request_headers_str) = http_config.request_headers {
        info!("Setting up user-defined HTTP headers.");
        for header in request_headers_str.split(',').map(str::trim) {
            let parts: Vec<&str> = header.splitn(2, ':').collect();
            if parts.len() == 2 {
                let name = parts[0].trim();
                let value = parts[1].trim();
                request_header_headermap.insert(HeaderName::from_str(name)?, HeaderValue::from_str(value)?);
            }
        }
    }

    if let Some(cookies_str) = http_config.http_cookies {
        info!("Setting up user-defined HTTP cookies.");
        match Cookie::parse(cookies_str) {
            Ok(cookie) => {
                request_header_headermap.insert(COOKIE, HeaderValue::from_str(cookie.to_string().as_ref())?);
            }
            Err(err) => {
                error!(error = %err, "Can't sanitize cookie");
            }
        }
    }

    let client = client_config.default_headers(request_header_headermap).build()?;
    info!("Built HTTP client with User configuration");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hosts_default_to_https() {
        assert_eq!(parse_url("api.bank.az").map(|url| url.to_string()), Ok("https://api.bank.az/".to_string()));
        assert_eq!(
            parse_url("http://127.0.0.1:8080").map(|url| url.to_string()),
            Ok("http://127.0.0.1:8080/".to_string())
        );
    }

    #[test]
    fn base_url_always_ends_with_slash() -> Result<()> {
        let args = AppArgs::new(Url::parse("https://api.bank.az/gateway")?);
        assert_eq!(args.base_url().as_str(), "https://api.bank.az/gateway/");
        assert_eq!(args.base_url().join("pb/v1/customers/7")?.as_str(), "https://api.bank.az/gateway/pb/v1/customers/7");
        Ok(())
    }

    #[test]
    fn data_dir_is_normalised() -> Result<()> {
        let parsed = parse_data_dir("/var/lib/../lib/teller/./cache").map_err(AnyhowError::msg)?;
        assert_eq!(parsed, PathBuf::from("/var/lib/teller/cache"));
        Ok(())
    }

    #[test]
    fn client_builds_with_headers_token_and_cookies() -> Result<()> {
        let args = HttpArgs::default()
            .with_auth_token(Some(SecretString::from("s3cr3t".to_string())))
            .with_request_headers(Some("x-channel:mobile, x-app-version:1.0".into()))
            .with_http_cookies(Some("session=abc".into()));
        let _client = Client::try_from(args)?;
        Ok(())
    }
}
