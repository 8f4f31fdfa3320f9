//! Skill overlap — Jaccard similarity over case-folded skill token sets.
//!
//! A job's skills are *derived*, not stored: the description is
//! whitespace-tokenized and intersected with the resume's own skill set, so a
//! job is only ever credited with skills the resume itself claims. Overlap
//! therefore measures "how many of the resume's claimed skills appear
//! verbatim in the job text", not a symmetric comparison.

use std::collections::BTreeSet;

/// Skills credited to a job: the resume's skills whose case-folded form
/// appears as a whitespace token of the job description.
pub fn derive_job_skills(description: &str, resume_skills: &[String]) -> Vec<String> {
    let lowered = description.to_lowercase();
    let tokens: BTreeSet<&str> = lowered.split_whitespace().collect();

    resume_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| tokens.contains(s.as_str()))
        .collect()
}

/// Jaccard index over case-folded sets: |intersection| / |union|.
/// Two empty sets are a perfect, vacuous match (1.0).
pub fn skill_overlap(resume_skills: &[String], job_skills: &[String]) -> f64 {
    if resume_skills.is_empty() && job_skills.is_empty() {
        return 1.0;
    }

    let resume: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let job: BTreeSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();

    let intersection = resume.intersection(&job).count();
    let union = resume.union(&job).count();

    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Job skills the resume does not claim: (job skills) − (resume skills).
/// Under the derivation rule above the job set is a subset of the resume set,
/// so this is always empty; the behavior is a deliberate contract and must
/// not be "fixed" here without a product decision.
pub fn missing_skills(job_skills: &[String], resume_skills: &[String]) -> Vec<String> {
    let resume: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    job_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !resume.contains(s))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
