//! Share and build-transfer links.
//!
//! - Share link: `<origin>/studio?c=<token>`
//! - Build-transfer link: `<origin>/builder?mode=custom&studio=<token>`

use anyhow::{Context, Result};
use url::Url;

use super::codec::ShareToken;

/// Query parameter carrying the token on the studio page.
pub const STUDIO_TOKEN_PARAM: &str = "c";

/// Query parameter carrying the token on the builder page.
pub const BUILDER_TOKEN_PARAM: &str = "studio";

/// Builds links from a fixed origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    origin: Url,
}

impl ShareLinks {
    /// Creates a link builder for an `http` or `https` origin.
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin).context(format!("Invalid share origin '{origin}'"))?;
        if !matches!(origin.scheme(), "http" | "https") {
            anyhow::bail!(
                "Share origin must use http or https, got '{}'",
                origin.scheme()
            );
        }
        Ok(Self { origin })
    }

    /// The configured origin.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Link that opens the Studio with the given configuration.
    #[must_use]
    pub fn studio_link(&self, token: &ShareToken) -> String {
        self.page("studio", &[(STUDIO_TOKEN_PARAM, token.as_str())])
    }

    /// Link that hands the configuration to the custom build flow.
    #[must_use]
    pub fn builder_link(&self, token: &ShareToken) -> String {
        self.page(
            "builder",
            &[("mode", "custom"), (BUILDER_TOKEN_PARAM, token.as_str())],
        )
    }

    fn page(&self, page: &str, params: &[(&str, &str)]) -> String {
        let mut url = self.origin.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}/{page}"));
        url.set_fragment(None);
        url.query_pairs_mut().clear().extend_pairs(params);
        url.to_string()
    }

    /// Extracts the token from a studio or builder link.
    ///
    /// Accepts absolute URLs and site-relative paths such as `/studio?c=...`.
    #[must_use]
    pub fn token_from_url(link: &str) -> Option<String> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse("http://localhost/").ok()?.join(link).ok()?
            }
            Err(_) => return None,
        };

        let mut studio = None;
        let mut builder = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                STUDIO_TOKEN_PARAM if studio.is_none() => studio = Some(value.into_owned()),
                BUILDER_TOKEN_PARAM if builder.is_none() => builder = Some(value.into_owned()),
                _ => {}
            }
        }
        studio.or(builder).filter(|token| !token.is_empty())
    }
}
