use anyhow::Context;
pub use relate_entrypoint::Environment;
use url::Url;

/// The configuration parameters for the application.
///
/// These are pulled from environment variables, which is one of the
/// recommended ways to populate the Docker container.
pub struct Config {
    /// Where the frontend lives; the post-login redirect target
    pub base_url: Url,

    /// Google OAuth2 client id
    pub google_client_id: String,
    /// Google OAuth2 client secret
    pub google_client_secret: String,
    /// The redirect uri registered with Google for this service
    pub google_callback_url: String,

    /// Path to a json file holding the object metadata set. When absent the
    /// built-in standard objects are used.
    pub metadata_path: Option<String>,

    /// The port to listen for HTTP requests on.
    pub port: usize,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("BASE_URL")
            .context("BASE_URL must be provided")?
            .parse()
            .context("BASE_URL should be a valid url")?;

        let google_client_id =
            std::env::var("GOOGLE_CLIENT_ID").context("GOOGLE_CLIENT_ID must be provided")?;
        let google_client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
            .context("GOOGLE_CLIENT_SECRET must be provided")?;
        let google_callback_url = std::env::var("GOOGLE_CALLBACK_URL")
            .context("GOOGLE_CALLBACK_URL must be provided")?;

        let metadata_path = std::env::var("METADATA_PATH").ok();

        let port: usize = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse::<usize>()
            .context("should be valid port number")?;

        let environment = Environment::new_or_prod();

        Ok(Config {
            base_url,
            google_client_id,
            google_client_secret,
            google_callback_url,
            metadata_path,
            port,
            environment,
        })
    }
}
