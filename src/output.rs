//! Response bodies for single-icon SVG and bulk JSON/JS requests.

use std::str::FromStr;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::{IconError, Result};
use crate::render::{self, RenderParams, params::is_truthy};
use crate::resolve::IconSubset;

/// Callback wrapped around `js` output when the request does not name one.
pub const DEFAULT_CALLBACK: &str = "SimpleSVG._loaderCallback";

/// Query name that selects bulk output in [`OutputFormatter::query`].
pub const BULK_QUERY: &str = "icons";

// ============================================================================
// Format
// ============================================================================

/// Output format, selected by the request's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Json,
    Js,
}

impl Format {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
            Self::Js => "application/javascript; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
            Self::Js => "js",
        }
    }
}

impl FromStr for Format {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            "js" => Ok(Self::Js),
            other => Err(IconError::NotFound(format!("unsupported format {other:?}"))),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// A response body with the metadata a front end needs to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// SVG document, JSON object or JS callback invocation.
    pub body: String,
    /// Value for the `Content-Type` header.
    pub content_type: &'static str,
    /// Suggested download name, set for SVG responses.
    pub filename: Option<String>,
    /// Serve as an attachment rather than inline.
    pub download: bool,
}

impl Response {
    fn new(format: Format, body: String) -> Self {
        Self {
            body,
            content_type: format.content_type(),
            filename: None,
            download: false,
        }
    }
}

// ============================================================================
// OutputFormatter
// ============================================================================

/// Produces response bodies from a loaded collection.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    callback: String,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self {
            callback: DEFAULT_CALLBACK.to_owned(),
        }
    }
}

impl OutputFormatter {
    /// Builds a formatter from `config`.
    ///
    /// Fails with [`IconError::InvalidCallback`] when the configured callback
    /// is not a valid JS name.
    pub fn new(config: &Config) -> Result<Self> {
        let callback = validate_callback(&config.callback)?;
        Ok(Self {
            callback: callback.to_owned(),
        })
    }

    /// Returns the callback used for `js` output when none is requested.
    pub fn default_callback(&self) -> &str {
        &self.callback
    }

    /// Renders one icon or alias as a standalone SVG document.
    pub fn svg(&self, collection: &Collection, name: &str, params: &RenderParams) -> Result<Response> {
        let icon = collection.icon(name)?;
        let body = render::render(&icon, params).to_svg();
        let mut response = Response::new(Format::Svg, body);
        response.filename = Some(format!("{name}.{}", Format::Svg.extension()));
        Ok(response)
    }

    /// Serializes the raw records for `names` as JSON.
    ///
    /// Fails with [`IconError::NotFound`] when none of the names resolve.
    pub fn json<I, S>(&self, collection: &Collection, names: I) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let body = bulk_json(collection, names)?;
        Ok(Response::new(Format::Json, body))
    }

    /// Serializes the raw records for `names` as a JS callback invocation.
    ///
    /// `callback` must match `^[a-z0-9_.]+$` (any case).
    pub fn js<I, S>(&self, collection: &Collection, names: I, callback: Option<&str>) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let callback = match callback {
            Some(callback) => validate_callback(callback)?,
            None => self.callback.as_str(),
        };
        let json = bulk_json(collection, names)?;
        Ok(Response::new(Format::Js, format!("{callback}({json})")))
    }

    /// Answers a request for `query` in `format` with raw query-string params.
    ///
    /// For SVG the query is the icon name. Bulk formats expect the query
    /// [`BULK_QUERY`] and a comma-separated `icons` parameter; `js` also reads
    /// `callback`. A truthy `download` marks SVG output as an attachment.
    pub fn query<I, K, V>(&self, collection: &Collection, query: &str, format: Format, params: I) -> Result<Response>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        let param = |name: &str| {
            params
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        match format {
            Format::Svg => {
                let render_params = RenderParams::from_query(params.iter().map(|(k, v)| (k, v)));
                let mut response = self.svg(collection, query, &render_params)?;
                response.download = param("download").is_some_and(is_truthy);
                Ok(response)
            }
            Format::Json | Format::Js => {
                if query != BULK_QUERY {
                    return Err(IconError::NotFound(query.to_owned()));
                }
                let names = param("icons").ok_or_else(|| IconError::NotFound("no icons requested".to_owned()))?;
                let names = names.split(',');
                if format == Format::Json {
                    self.json(collection, names)
                } else {
                    self.js(collection, names, param("callback"))
                }
            }
        }
    }
}

fn bulk_json<I, S>(collection: &Collection, names: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let subset: IconSubset = collection.icons(names);
    if subset.is_empty() {
        return Err(IconError::NotFound("none of the requested icons exist".to_owned()));
    }
    Ok(serde_json::to_string(&subset)?)
}

/// Checks a JS callback name against `^[a-z0-9_.]+$`, ignoring case.
pub fn validate_callback(callback: &str) -> Result<&str> {
    let valid = !callback.is_empty()
        && callback
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(callback)
    } else {
        Err(IconError::InvalidCallback(callback.to_owned()))
    }
}
