//! Job endpoints: lifecycle, media, transcription and outputs.

use std::path::PathBuf;

use crate::api::client::{require, CieloClient};
use crate::clients::{
    ApiResponse, CallOptions, Endpoint, QueryParams, RequestBody, ResponseFormat,
    ValidationError,
};

const JOB_ID: &str = "job_id";
const MEDIA_URL: &str = "media_url";
const MEDIA_PATH: &str = "media_path";

impl CieloClient {
    /// Creates a job.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn job_create(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.call(Endpoint::JobCreate, params, options).await
    }

    /// Lists jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn job_list(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.call(Endpoint::JobList, params, options).await
    }

    /// Authorizes a job. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn job_authorize(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::JobAuthorize, params, options).await
    }

    /// Deletes a job. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn job_delete(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::JobDelete, params, options).await
    }

    /// Fetches job details. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn job_info(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::JobInfo, params, options).await
    }

    /// Attaches media to a job. Requires `job_id` and a media source.
    ///
    /// With `media_url` the service fetches the media itself. Otherwise
    /// `media_path` names a local file that is streamed as the request body;
    /// the path is consumed here and never sent as a query parameter.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingField`] if `job_id` is absent
    /// - [`ValidationError::MissingMediaSource`] if neither source is given
    /// - [`ValidationError::UnreadableMedia`] if `media_path` is not a readable file
    pub async fn add_media(
        &self,
        mut params: QueryParams,
        mut options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        require(&params, JOB_ID)?;

        if params.contains_key(MEDIA_URL) {
            params.remove(MEDIA_PATH);
        } else {
            let path = params
                .remove(MEDIA_PATH)
                .map(PathBuf::from)
                .ok_or(ValidationError::MissingMediaSource)?;
            let path = readable_file(path).await?;
            options.body = Some(RequestBody::File(path));
        }

        self.call(Endpoint::AddMedia, params, options).await
    }

    /// Attaches media by URL. Requires `job_id` and `media_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if either field is absent.
    pub async fn add_media_url(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        require(&params, JOB_ID)?;
        require(&params, MEDIA_URL)?;
        self.call(Endpoint::AddMediaUrl, params, options).await
    }

    /// Fetches the media attached to a job. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn get_media(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::Media, params, options).await
    }

    /// Requests transcription. Requires `job_id`.
    ///
    /// Defaults `transcription_fidelity` to `PREMIUM` and `priority` to
    /// `STANDARD`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn perform_transcription(
        &self,
        mut params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        params.insert_default("transcription_fidelity", "PREMIUM");
        params.insert_default("priority", "STANDARD");
        self.job_call(Endpoint::PerformTranscription, params, options)
            .await
    }

    /// Fetches the plain-text transcript. Requires `job_id`.
    ///
    /// The response is returned in [`ResponseFormat::Raw`] unless the caller
    /// chose a format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn get_transcript(
        &self,
        params: QueryParams,
        mut options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        options.response_format = Some(options.response_format.unwrap_or(ResponseFormat::Raw));
        self.job_call(Endpoint::GetTranscript, params, options).await
    }

    /// Fetches a caption file. Requires `job_id`.
    ///
    /// Defaults `caption_format` to `SRT`. The caption text is returned raw
    /// unless `build_url` is set to anything other than an empty string or
    /// `0`, in which case the service answers with a JSON document holding a
    /// download URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn get_caption(
        &self,
        mut params: QueryParams,
        mut options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        params.insert_default("caption_format", "SRT");
        let format = if params.get("build_url").is_some_and(is_truthy) {
            ResponseFormat::Json
        } else {
            ResponseFormat::Raw
        };
        options.response_format = Some(options.response_format.unwrap_or(format));
        self.job_call(Endpoint::GetCaption, params, options).await
    }

    /// Fetches one element list of a job. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn get_elementlist(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::GetElementList, params, options)
            .await
    }

    /// Lists the element lists of a job. Requires `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `job_id` is absent.
    pub async fn list_elementlists(
        &self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        self.job_call(Endpoint::ListElementLists, params, options)
            .await
    }

    async fn job_call(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        require(&params, JOB_ID)?;
        self.call(endpoint, params, options).await
    }
}

/// Resolves `path` to an absolute path naming a regular file.
async fn readable_file(path: PathBuf) -> Result<PathBuf, ValidationError> {
    let resolved = match tokio::fs::canonicalize(&path).await {
        Ok(resolved) => resolved,
        Err(_) => return Err(ValidationError::UnreadableMedia { path }),
    };
    match tokio::fs::metadata(&resolved).await {
        Ok(metadata) if metadata.is_file() => Ok(resolved),
        _ => Err(ValidationError::UnreadableMedia { path }),
    }
}

/// Loose truthiness of a query value: only `""` and `"0"` are false.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}
