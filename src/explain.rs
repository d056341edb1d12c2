//! Natural-language explanation of a region's cluster.
//!
//! The clustering engine never depends on this module. A text generator is
//! plugged in through [`ExplanationService`]; the bundled Gemini client is
//! available behind the `gemini` feature.

use crate::summary::RegionProfile;
use thiserror::Error;
use tracing::debug;

/// Errors from a text-generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No credentials or endpoint configured
    #[error("explanation service is not configured: {0}")]
    NotConfigured(String),

    /// Transport or HTTP failure
    #[error("explanation request failed: {0}")]
    Request(String),

    /// The service answered without any text
    #[error("explanation service returned no text")]
    EmptyResponse,

    /// The response could not be decoded
    #[error("malformed explanation response: {0}")]
    Malformed(String),
}

/// A capability that turns a prompt into text.
pub trait ExplanationService {
    fn generate_explanation(&self, prompt: &str) -> Result<String, ServiceError>;
}

impl<S: ExplanationService + ?Sized> ExplanationService for &S {
    fn generate_explanation(&self, prompt: &str) -> Result<String, ServiceError> {
        (**self).generate_explanation(prompt)
    }
}

impl<S: ExplanationService + ?Sized> ExplanationService for Box<S> {
    fn generate_explanation(&self, prompt: &str) -> Result<String, ServiceError> {
        (**self).generate_explanation(prompt)
    }
}

/// Build the analysis prompt for one region.
pub fn build_prompt(profile: &RegionProfile, total_regions: usize, num_clusters: usize) -> String {
    let membership = profile
        .membership
        .iter()
        .map(|u| format!("{u:.3}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "You are an agricultural expert and data scientist. I have rice productivity \
         clustering results for {total_regions} districts, grouped into {num_clusters} clusters \
         ranked High, Medium and Low.\n\n\
         Analyse the following district:\n\
         - District: {}\n\
         - Cluster: {}\n\
         - Membership degrees: [{membership}]\n\
         - Variable values (normalized 0-1):\n",
        profile.name, profile.tier
    );
    for (name, value) in &profile.features {
        prompt.push_str(&format!("    {name}: {value:.3}\n"));
    }
    prompt.push_str(
        "\nBased on this data, give a comprehensive analysis. Briefly describe this district's \
         position, identify its 2-3 strongest and 2-3 weakest variables, and give 2-3 specific \
         strategic recommendations to raise rice productivity in this district. Write \
         professionally and plainly, as a report to the local agriculture office.\n",
    );
    prompt
}

/// Ask `service` to explain the region described by `profile`.
pub fn explain_region<S: ExplanationService + ?Sized>(
    service: &S,
    profile: &RegionProfile,
    total_regions: usize,
    num_clusters: usize,
) -> Result<String, ServiceError> {
    let prompt = build_prompt(profile, total_regions, num_clusters);
    debug!(region = %profile.name, prompt_len = prompt.len(), "Requesting explanation");

    let text = service.generate_explanation(&prompt)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::EmptyResponse);
    }
    Ok(text.to_string())
}
