//! Test declarations as written by the user.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::plan::Payload;
use crate::request::HttpMethod;

/// Options accompanying an instruction at registration time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationOptions {
    /// Base URL of the API under test.
    pub baseurl: String,
    /// Forces the HTTP method instead of the interpreted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Forces the request payload instead of the interpreted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl DeclarationOptions {
    /// Options targeting the given base URL with no overrides.
    #[must_use]
    pub fn new(baseurl: impl Into<String>) -> Self {
        Self {
            baseurl: baseurl.into(),
            method: None,
            payload: None,
        }
    }

    /// Overrides the method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Overrides the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// One natural-language test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestDeclaration {
    instruction: String,
    baseurl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<HttpMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Payload>,
}

impl TestDeclaration {
    /// Builds a declaration, checking that it can be run at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the instruction is blank or the base URL is not
    /// an absolute `http`/`https` URL.
    pub fn new(instruction: impl Into<String>, options: DeclarationOptions) -> DomainResult<Self> {
        let instruction = instruction.into();
        if instruction.trim().is_empty() {
            return Err(DomainError::InvalidDeclaration(
                "instruction must not be empty".to_string(),
            ));
        }

        let baseurl = options.baseurl.trim().to_string();
        if baseurl.is_empty() {
            return Err(DomainError::InvalidDeclaration(format!(
                "missing baseurl for '{instruction}'"
            )));
        }
        let parsed = url::Url::parse(&baseurl)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {baseurl}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "baseurl must use http or https: {baseurl}"
            )));
        }

        Ok(Self {
            instruction,
            baseurl,
            method: options.method,
            payload: options.payload,
        })
    }

    /// The natural-language instruction.
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn baseurl(&self) -> &str {
        &self.baseurl
    }

    /// The method override, if any.
    #[must_use]
    pub const fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    /// The payload override, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}
