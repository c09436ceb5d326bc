//! Static base URL tables.

use obitpub_core::Environment;

/// Path appended to every base URL.
pub const OBITUARIES_PATH: &str = "/v1/obituaries/";

const GATEWAY_DEV: &str = "https://h8j5wx2ek8.execute-api.us-east-1.amazonaws.com/dev";
const GATEWAY_STAGE: &str = "https://osw92dhpje.execute-api.us-east-1.amazonaws.com/stage";
const GATEWAY_PROD: &str = "https://eqvuex5md7.execute-api.us-east-1.amazonaws.com/prod";

const DIRECT_DEV: &str = "https://obit-intake.dev.legint.net/api";
const DIRECT_STAGE: &str = "https://obit-intake.stage.legint.net/api";
const DIRECT_PROD: &str = "https://obit-intake.prod.legint.net/api";

/// Which table the client resolves base URLs from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Routing {
    /// Through the API gateway.
    #[default]
    Gateway,
    /// Straight to the intake service, bypassing the gateway.
    Direct,
    /// One fixed base URL for every environment (local proxies, tests).
    Custom(String),
}

impl Routing {
    pub fn from_direct_flag(direct: bool) -> Self {
        if direct {
            Self::Direct
        } else {
            Self::Gateway
        }
    }

    /// Base URL for `environment`, without a trailing slash.
    pub fn base_url(&self, environment: Environment) -> &str {
        match (self, environment) {
            (Self::Gateway, Environment::Dev) => GATEWAY_DEV,
            (Self::Gateway, Environment::Stage) => GATEWAY_STAGE,
            (Self::Gateway, Environment::Prod) => GATEWAY_PROD,
            (Self::Direct, Environment::Dev) => DIRECT_DEV,
            (Self::Direct, Environment::Stage) => DIRECT_STAGE,
            (Self::Direct, Environment::Prod) => DIRECT_PROD,
            (Self::Custom(base), _) => base.trim_end_matches('/'),
        }
    }

    /// Full URL of the obituaries endpoint for `environment`.
    pub fn endpoint_url(&self, environment: Environment) -> String {
        format!("{}{}", self.base_url(environment), OBITUARIES_PATH)
    }
}
