//! Query parameters and validation for the path endpoint.

use serde::{Deserialize, Serialize};

use indoorpath_lib::{PathMode, PathRequest};

use crate::ProblemDetails;

/// Message used when either end of a path request is missing.
pub const MISSING_ENDPOINTS: &str = "`from` and `to` are required";

/// Validation for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// `GET /path?from=..&to=..&mode=..&accessible=..`
///
/// Every field is optional at the parsing layer so a missing parameter is
/// reported by [`Validate`] rather than by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathQuery {
    /// Source landmark name.
    pub from: Option<String>,
    /// Destination landmark name or category token.
    pub to: Option<String>,
    /// `bfs` (default) or `graph`.
    pub mode: Option<String>,
    /// Step-free routing; defaults to true.
    pub accessible: Option<bool>,
}

impl PathQuery {
    /// Landmark names are matched exactly, so only blank values are rejected.
    fn endpoint(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    fn mode(&self, request_id: &str) -> Result<PathMode, Box<ProblemDetails>> {
        match self.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(PathMode::Bfs),
            Some(token) => token
                .parse()
                .map_err(|err: indoorpath_lib::Error| {
                    Box::new(ProblemDetails::bad_request(err.to_string(), request_id))
                }),
        }
    }

    /// Endpoints and mode, checked once for both validation and conversion.
    fn checked(&self, request_id: &str) -> Result<(&str, &str, PathMode), Box<ProblemDetails>> {
        let (Some(from), Some(to)) = (Self::endpoint(&self.from), Self::endpoint(&self.to)) else {
            return Err(Box::new(ProblemDetails::bad_request(
                MISSING_ENDPOINTS,
                request_id,
            )));
        };
        Ok((from, to, self.mode(request_id)?))
    }

    /// Validate and convert into a library request.
    pub fn into_path_request(
        self,
        max_subgraph_depth: usize,
        request_id: &str,
    ) -> Result<PathRequest, Box<ProblemDetails>> {
        let (from, to, mode) = self.checked(request_id)?;
        let mut request = PathRequest::new(from, to)
            .with_mode(mode)
            .with_accessibility(self.accessible.unwrap_or(true));
        request.max_subgraph_depth = max_subgraph_depth;
        Ok(request)
    }
}

impl Validate for PathQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.checked(request_id).map(|_| ())
    }
}
