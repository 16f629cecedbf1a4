//! The closed set of cielo24 API endpoints.

use std::fmt;
use std::str::FromStr;

use crate::clients::errors::ValidationError;

/// A supported cielo24 API endpoint.
///
/// The endpoint path is appended to the base URL, e.g.
/// `https://api.cielo24.com/api/` + `job/new`.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::Endpoint;
///
/// let endpoint: Endpoint = "job/del".parse().unwrap();
/// assert_eq!(endpoint, Endpoint::JobDelete);
/// assert_eq!(endpoint.path(), "job/del");
/// assert!("job/explode".parse::<Endpoint>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `account/login`
    Login,
    /// `account/logout`
    Logout,
    /// `account/update_password`
    UpdatePassword,
    /// `account/generate_api_key`
    GenerateApiKey,
    /// `account/remove_api_key`
    RemoveApiKey,
    /// `job/new`
    JobCreate,
    /// `job/authorize`
    JobAuthorize,
    /// `job/del`
    JobDelete,
    /// `job/info`
    JobInfo,
    /// `job/list`
    JobList,
    /// `job/add_media`
    AddMedia,
    /// `job/add_media_url`
    AddMediaUrl,
    /// `job/media`
    Media,
    /// `job/perform_transcription`
    PerformTranscription,
    /// `job/get_transcript`
    GetTranscript,
    /// `job/get_caption`
    GetCaption,
    /// `job/get_elementlist`
    GetElementList,
    /// `job/list_elementlists`
    ListElementLists,
}

impl Endpoint {
    /// Every supported endpoint, in documentation order.
    pub const ALL: [Self; 18] = [
        Self::Login,
        Self::Logout,
        Self::UpdatePassword,
        Self::GenerateApiKey,
        Self::RemoveApiKey,
        Self::JobCreate,
        Self::JobAuthorize,
        Self::JobDelete,
        Self::JobInfo,
        Self::JobList,
        Self::AddMedia,
        Self::AddMediaUrl,
        Self::Media,
        Self::PerformTranscription,
        Self::GetTranscript,
        Self::GetCaption,
        Self::GetElementList,
        Self::ListElementLists,
    ];

    /// Returns the path appended to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "account/login",
            Self::Logout => "account/logout",
            Self::UpdatePassword => "account/update_password",
            Self::GenerateApiKey => "account/generate_api_key",
            Self::RemoveApiKey => "account/remove_api_key",
            Self::JobCreate => "job/new",
            Self::JobAuthorize => "job/authorize",
            Self::JobDelete => "job/del",
            Self::JobInfo => "job/info",
            Self::JobList => "job/list",
            Self::AddMedia => "job/add_media",
            Self::AddMediaUrl => "job/add_media_url",
            Self::Media => "job/media",
            Self::PerformTranscription => "job/perform_transcription",
            Self::GetTranscript => "job/get_transcript",
            Self::GetCaption => "job/get_caption",
            Self::GetElementList => "job/get_elementlist",
            Self::ListElementLists => "job/list_elementlists",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.path() == s)
            .ok_or_else(|| ValidationError::UnknownEndpoint {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_round_trips_through_its_path() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.path().parse::<Endpoint>().unwrap(), endpoint);
        }
    }

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn test_unknown_and_empty_names_are_rejected() {
        assert!(matches!(
            "job/delete".parse::<Endpoint>(),
            Err(ValidationError::UnknownEndpoint { name }) if name == "job/delete"
        ));
        assert!("".parse::<Endpoint>().is_err());
        assert!("/job/del".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_display_matches_path() {
        assert_eq!(Endpoint::GetCaption.to_string(), "job/get_caption");
    }
}
