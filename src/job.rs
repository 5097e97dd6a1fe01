//! Composite identifiers for queued translation jobs.
//!
//! A [`JobKey`] names a stored job: `<interactionId>_<language>.json`.
//! A [`TrackingToken`] is the button `custom_id` that lets a user find their
//! job again: `id/<jobKey>/<userId>`.
//!
//! Both types reject components containing either separator, so every
//! encoded value decodes back to exactly one pair of components.

use std::fmt;
use thiserror::Error;

pub const JOB_KEY_SEPARATOR: char = '_';
pub const TRACKING_SEPARATOR: char = '/';
pub const TRACKING_PREFIX: &str = "id";
const JOB_KEY_EXTENSION: &str = ".json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobKeyError {
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("{field} contains reserved character '{separator}'")]
    ReservedCharacter {
        field: &'static str,
        separator: char,
    },
    #[error("malformed job key: {0}")]
    MalformedKey(String),
    #[error("malformed tracking token: {0}")]
    MalformedToken(String),
}

fn check_component(field: &'static str, value: &str) -> Result<(), JobKeyError> {
    if value.is_empty() {
        return Err(JobKeyError::Empty(field));
    }
    for separator in [JOB_KEY_SEPARATOR, TRACKING_SEPARATOR] {
        if value.contains(separator) {
            return Err(JobKeyError::ReservedCharacter { field, separator });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey {
    interaction_id: String,
    language: String,
}

impl JobKey {
    pub fn new(interaction_id: &str, language: &str) -> Result<Self, JobKeyError> {
        check_component("interaction id", interaction_id)?;
        check_component("language", language)?;
        Ok(Self {
            interaction_id: interaction_id.to_string(),
            language: language.to_string(),
        })
    }

    pub fn parse(key: &str) -> Result<Self, JobKeyError> {
        let stem = key
            .strip_suffix(JOB_KEY_EXTENSION)
            .ok_or_else(|| JobKeyError::MalformedKey(key.to_string()))?;
        let (interaction_id, language) = stem
            .split_once(JOB_KEY_SEPARATOR)
            .ok_or_else(|| JobKeyError::MalformedKey(key.to_string()))?;
        Self::new(interaction_id, language)
            .map_err(|_| JobKeyError::MalformedKey(key.to_string()))
    }

    pub fn interaction_id(&self) -> &str {
        &self.interaction_id
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.interaction_id, JOB_KEY_SEPARATOR, self.language, JOB_KEY_EXTENSION
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingToken {
    job_key: JobKey,
    user_id: String,
}

impl TrackingToken {
    pub fn new(job_key: JobKey, user_id: &str) -> Result<Self, JobKeyError> {
        check_component("user id", user_id)?;
        Ok(Self {
            job_key,
            user_id: user_id.to_string(),
        })
    }

    /// Decode a button `custom_id`. Exactly three `/`-separated parts are
    /// accepted, the first being the tracking prefix.
    pub fn parse(custom_id: &str) -> Result<Self, JobKeyError> {
        let malformed = || JobKeyError::MalformedToken(custom_id.to_string());

        let parts: Vec<&str> = custom_id.split(TRACKING_SEPARATOR).collect();
        let [prefix, job_key, user_id] = parts.as_slice() else {
            return Err(malformed());
        };
        if *prefix != TRACKING_PREFIX {
            return Err(malformed());
        }

        let job_key = JobKey::parse(job_key).map_err(|_| malformed())?;
        Self::new(job_key, user_id).map_err(|_| malformed())
    }

    pub fn job_key(&self) -> &JobKey {
        &self.job_key
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            TRACKING_PREFIX, TRACKING_SEPARATOR, self.job_key, TRACKING_SEPARATOR, self.user_id
        )
    }
}
